//! Per-test setup and teardown.
//!
//! Every suite starts from a freshly reset service. [`ApiFixture`] does the
//! reset and owns the test's log; [`UiFixture`] adds a browser on top.

use tracing::info;
use uuid::Uuid;

use crate::api::{Auth, Credentials, TodoApi};
use crate::config::ProbeConfig;
use crate::logging::TestLog;
use crate::result::ProbeResult;

/// Longest tag the service accepts
pub const MAX_TAG_LEN: usize = 20;

/// Random tag of exactly `len` characters
#[must_use]
pub fn random_tag(len: usize) -> String {
    let mut tag = String::with_capacity(len + 36);
    while tag.len() < len {
        tag.push_str(&Uuid::new_v4().to_string());
    }
    tag.truncate(len);
    tag
}

/// REST client on a freshly reset service
#[derive(Debug)]
pub struct ApiFixture {
    /// Action wrapper
    pub api: TodoApi,
    /// Settings the fixture was built from
    pub config: ProbeConfig,
    log: TestLog,
}

impl ApiFixture {
    /// Install the test log and reset the service
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the reset fails.
    pub async fn setup(name: &str, config: ProbeConfig) -> ProbeResult<Self> {
        let log = TestLog::install(name);
        let api = TodoApi::new(&config.base_url)?;
        let _ = api.reset().await?;
        info!(base_url = %config.base_url, "service reset");
        Ok(Self { api, config, log })
    }

    /// Log a numbered step
    pub fn step(&self, number: u32, description: &str) {
        self.log.step(number, description);
    }

    /// Test log
    #[must_use]
    pub const fn log(&self) -> &TestLog {
        &self.log
    }

    /// Seeded account
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.config.credentials
    }

    /// Basic auth for the seeded account
    #[must_use]
    pub fn auth(&self) -> Auth {
        Auth::Basic(self.config.credentials.clone())
    }
}

#[cfg(feature = "browser")]
pub use ui::UiFixture;

#[cfg(feature = "browser")]
mod ui {
    use tracing::warn;

    use super::ApiFixture;
    use crate::browser::{Browser, CdpSession};
    use crate::config::ProbeConfig;
    use crate::locator::ElementLocator;
    use crate::page::TodoPage;
    use crate::result::ProbeResult;

    /// Browser on the web UI of a freshly reset service
    #[derive(Debug)]
    pub struct UiFixture {
        /// REST side, for seeding data
        pub api: ApiFixture,
        /// Page object
        pub page: TodoPage<CdpSession>,
        /// Log out before closing the browser
        pub needs_logout: bool,
        browser: Browser,
    }

    impl UiFixture {
        /// Reset the service, launch Chromium and open the web UI
        ///
        /// # Errors
        ///
        /// Returns an error if the reset fails, Chromium cannot start, or the page does not load.
        pub async fn setup(name: &str, config: ProbeConfig) -> ProbeResult<Self> {
            let api = ApiFixture::setup(name, config).await?;
            let browser = Browser::launch(&api.config.browser).await?;
            let session = browser.new_session().await?;
            let locator = ElementLocator::new(session)
                .with_timeout(api.config.locator_timeout())
                .with_poll_interval(api.config.poll_interval());
            let page = TodoPage::open(locator, api.config.web_url.clone()).await?;
            Ok(Self {
                api,
                page,
                needs_logout: true,
                browser,
            })
        }

        /// Log in with the seeded account
        ///
        /// # Errors
        ///
        /// Returns an error if the login form never shows up.
        pub async fn login_default(&self) -> ProbeResult<()> {
            let creds = self.api.credentials();
            self.page.login(&creds.username, &creds.password).await
        }

        /// Log out if needed, then close the browser
        ///
        /// The browser is closed even when logging out fails.
        ///
        /// # Errors
        ///
        /// Returns the logout error, or the close error if logout succeeded.
        pub async fn teardown(self) -> ProbeResult<()> {
            let logout = if self.needs_logout {
                self.page.logout().await
            } else {
                Ok(())
            };
            if let Err(ref e) = logout {
                warn!(error = %e, "logout failed during teardown");
            }
            let closed = self.browser.close().await;
            logout.and(closed)
        }
    }
}
