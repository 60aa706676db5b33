//! Suite configuration.
//!
//! Defaults point at the reference deployment. Every field can be
//! overridden from the environment, which is how CI retargets the suites.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::api::Credentials;
use crate::locator::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
use crate::result::{ProbeError, ProbeResult};

/// Default API root of the service under test
pub const DEFAULT_BASE_URL: &str = "http://iankusheva.qatest.dataiku.com/";

/// Path of the web UI, relative to the API root
pub const WEB_UI_PATH: &str = "web/index.html";

/// Seeded account present after every reset
pub const DEFAULT_USERNAME: &str = "QA";

/// Password of the seeded account
pub const DEFAULT_PASSWORD: &str = "willWin";

/// Browser settings for the UI suites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// Everything a fixture needs to reach the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// API root, ending in `/`
    pub base_url: String,
    /// Web UI entry page
    pub web_url: String,
    /// Seeded account
    pub credentials: Credentials,
    /// Element lookup timeout in milliseconds
    pub locator_timeout_ms: u64,
    /// Element lookup poll interval in milliseconds
    pub poll_interval_ms: u64,
    /// Browser settings
    pub browser: BrowserConfig,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::for_base_url(DEFAULT_BASE_URL)
    }
}

impl ProbeConfig {
    /// Defaults for a service rooted at `base_url`
    #[must_use]
    pub fn for_base_url(base_url: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            web_url: format!("{base_url}{WEB_UI_PATH}"),
            base_url,
            credentials: Credentials::new(DEFAULT_USERNAME, DEFAULT_PASSWORD),
            locator_timeout_ms: u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            poll_interval_ms: u64::try_from(DEFAULT_POLL_INTERVAL.as_millis()).unwrap_or(u64::MAX),
            browser: BrowserConfig::default(),
        }
    }

    /// Defaults overridden by `TODO_PROBE_*` variables and `CHROMIUM_PATH`
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Config`] if a numeric or boolean variable does not parse.
    pub fn from_env() -> ProbeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Config`] if a numeric or boolean variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ProbeResult<Self> {
        let mut config = lookup("TODO_PROBE_BASE_URL")
            .map_or_else(Self::default, |url| Self::for_base_url(&url));

        if let Some(url) = lookup("TODO_PROBE_WEB_URL") {
            config.web_url = url;
        }
        if let Some(username) = lookup("TODO_PROBE_USERNAME") {
            config.credentials.username = username;
        }
        if let Some(password) = lookup("TODO_PROBE_PASSWORD") {
            config.credentials.password = password;
        }
        if let Some(ms) = lookup("TODO_PROBE_TIMEOUT_MS") {
            config.locator_timeout_ms = parse_var("TODO_PROBE_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = lookup("TODO_PROBE_POLL_MS") {
            config.poll_interval_ms = parse_var("TODO_PROBE_POLL_MS", &ms)?;
        }
        if let Some(headless) = lookup("TODO_PROBE_HEADLESS") {
            config.browser.headless = parse_var("TODO_PROBE_HEADLESS", &headless)?;
        }
        if let Some(path) = lookup("CHROMIUM_PATH") {
            config.browser.chromium_path = Some(path);
        }
        Ok(config)
    }

    /// Set the seeded account
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set the locator timeout
    #[must_use]
    pub const fn with_locator_timeout(mut self, timeout_ms: u64) -> Self {
        self.locator_timeout_ms = timeout_ms;
        self
    }

    /// Set the browser settings
    #[must_use]
    pub fn with_browser(mut self, browser: BrowserConfig) -> Self {
        self.browser = browser;
        self
    }

    /// Locator timeout as Duration
    #[must_use]
    pub const fn locator_timeout(&self) -> Duration {
        Duration::from_millis(self.locator_timeout_ms)
    }

    /// Poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> ProbeResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ProbeError::config(format!("{key}={value:?}: {e}")))
}
