//! Page navigation.

use std::sync::Arc;
use tracing::debug;

use crate::driver::DomSession;
use crate::locator::ElementLocator;
use crate::result::ProbeResult;

/// Opens and reloads the web UI
#[derive(Debug)]
pub struct Navigation<S> {
    locator: Arc<ElementLocator<S>>,
    url: String,
}

impl<S: DomSession> Navigation<S> {
    pub(crate) fn new(locator: Arc<ElementLocator<S>>, url: impl Into<String>) -> Self {
        Self {
            locator,
            url: url.into(),
        }
    }

    /// Entry page URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Navigate to the entry page
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Driver`] if navigation fails.
    pub async fn open(&self) -> ProbeResult<()> {
        debug!(url = %self.url, "opening page");
        self.locator.session().goto(&self.url).await?;
        Ok(())
    }

    /// Reload the current page
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Driver`] if the reload fails.
    pub async fn refresh(&self) -> ProbeResult<()> {
        self.locator.session().refresh().await?;
        Ok(())
    }
}
