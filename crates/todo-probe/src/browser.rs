//! Chromium backend over the DevTools protocol.
//!
//! Only compiled with the `browser` feature. [`Browser`] owns the Chromium
//! process and its CDP event loop; [`CdpSession`] adapts one tab to
//! [`DomSession`] so the locator and page object run against a real page.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tracing::{debug, warn};

use crate::config::BrowserConfig;
use crate::driver::{By, DomElement, DomSession, DriverFault};
use crate::result::{ProbeError, ProbeResult};

/// Same rules Selenium uses for `is_displayed`, minus the ancestor walk
const VISIBILITY_PROBE: &str = "function() {
    const style = window.getComputedStyle(this);
    const rect = this.getBoundingClientRect();
    return style.display !== 'none'
        && style.visibility !== 'hidden'
        && Number(style.opacity) !== 0
        && (rect.width > 0 || rect.height > 0);
}";

/// Clears an input the way a user would, so bindings see the change
const CLEAR_INPUT: &str = "function() {
    this.value = '';
    this.dispatchEvent(new Event('input', { bubbles: true }));
    this.dispatchEvent(new Event('change', { bubbles: true }));
}";

/// Messages Chromium returns when a node handle outlived its document
const STALE_MARKERS: [&str; 3] = ["Could not find node", "No node with given id", "Cannot find context"];

/// A running Chromium instance
#[derive(Debug)]
pub struct Browser {
    config: BrowserConfig,
    inner: CdpBrowser,
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch Chromium
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::BrowserLaunch`] if Chromium cannot be started.
    pub async fn launch(config: &BrowserConfig) -> ProbeResult<Self> {
        let mut builder = CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|message| ProbeError::BrowserLaunch { message })?;

        let (inner, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| ProbeError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "CDP handler stopped");
                    break;
                }
            }
        });

        Ok(Self {
            config: config.clone(),
            inner,
            handle,
        })
    }

    /// Open a blank tab
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Driver`] if the tab cannot be created.
    pub async fn new_session(&self) -> ProbeResult<CdpSession> {
        let page = self.inner.new_page("about:blank").await.map_err(|e| ProbeError::Driver {
            message: e.to_string(),
        })?;
        Ok(CdpSession { page })
    }

    /// Launch settings
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Close Chromium and stop the event loop
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Driver`] if Chromium does not acknowledge the close.
    pub async fn close(mut self) -> ProbeResult<()> {
        let closed = self.inner.close().await;
        if let Err(ref e) = closed {
            warn!(error = %e, "browser did not close cleanly");
        }
        let _ = self.inner.wait().await;
        self.handle.abort();
        closed.map(|_| ()).map_err(|e| ProbeError::Driver {
            message: e.to_string(),
        })
    }
}

/// One Chromium tab
#[derive(Debug, Clone)]
pub struct CdpSession {
    page: Page,
}

impl CdpSession {
    /// Underlying chromiumoxide page
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }
}

#[async_trait]
impl DomSession for CdpSession {
    type Element = CdpElement;

    async fn find_elements(&self, by: &By) -> Result<Vec<CdpElement>, DriverFault> {
        let found = match by.to_css() {
            Some(css) => self.page.find_elements(css).await,
            None => self.page.find_xpaths(by.value()).await,
        };
        match found {
            Ok(elements) => Ok(elements.into_iter().map(CdpElement).collect()),
            Err(e) => Err(fault(e, Some(by))),
        }
    }

    async fn goto(&self, url: &str) -> Result<(), DriverFault> {
        self.page.goto(url).await.map_err(|e| fault(e, None))?;
        Ok(())
    }

    async fn refresh(&self) -> Result<(), DriverFault> {
        self.page.reload().await.map_err(|e| fault(e, None))?;
        Ok(())
    }
}

/// A node in a [`CdpSession`]
#[derive(Debug)]
pub struct CdpElement(Element);

#[async_trait]
impl DomElement for CdpElement {
    async fn is_displayed(&self) -> Result<bool, DriverFault> {
        let returns = self
            .0
            .call_js_fn(VISIBILITY_PROBE, false)
            .await
            .map_err(|e| fault(e, None))?;
        Ok(returns
            .result
            .value
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    async fn click(&self) -> Result<(), DriverFault> {
        self.0.click().await.map_err(|e| fault(e, None))?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), DriverFault> {
        self.0
            .call_js_fn(CLEAR_INPUT, false)
            .await
            .map_err(|e| fault(e, None))?;
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<(), DriverFault> {
        self.0.focus().await.map_err(|e| fault(e, None))?;
        self.0.type_str(text).await.map_err(|e| fault(e, None))?;
        Ok(())
    }

    async fn press_enter(&self) -> Result<(), DriverFault> {
        self.0.press_key("Enter").await.map_err(|e| fault(e, None))?;
        Ok(())
    }

    async fn text(&self) -> Result<String, DriverFault> {
        let text = self.0.inner_text().await.map_err(|e| fault(e, None))?;
        Ok(text.unwrap_or_default())
    }
}

fn fault(error: CdpError, by: Option<&By>) -> DriverFault {
    classify(&error.to_string(), matches!(error, CdpError::Timeout), by)
}

fn classify(message: &str, timed_out: bool, by: Option<&By>) -> DriverFault {
    if timed_out {
        return DriverFault::Timeout {
            message: message.to_string(),
        };
    }
    if STALE_MARKERS.iter().any(|marker| message.contains(marker)) {
        return DriverFault::Stale {
            message: message.to_string(),
        };
    }
    match by {
        // XPath searches with no hits come back as protocol errors
        Some(by) if message.contains("search") || message.contains("not found") => DriverFault::NoSuchElement {
            locator: by.to_string(),
        },
        _ => DriverFault::Session {
            message: message.to_string(),
        },
    }
}
