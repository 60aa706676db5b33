//! Polling element lookup.
//!
//! Page scripts update their bindings after network responses, so a single
//! lookup right after an action is flaky. [`ElementLocator`] owns a session
//! and re-queries it at a fixed interval until the element is visible or the
//! timeout elapses.
//!
//! A miss is a value (`None` / empty `Vec`), never an error. Only faults the
//! driver cannot recover from surface as [`ProbeError::Driver`].

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::driver::{By, DomElement, DomSession, DriverFault};
use crate::result::{ProbeError, ProbeResult};

/// Default timeout for visible lookups (3 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wraps a browser session with explicit-wait lookups
#[derive(Debug)]
pub struct ElementLocator<S> {
    session: S,
    timeout: Duration,
    poll_interval: Duration,
}

impl<S: DomSession> ElementLocator<S> {
    /// Wrap `session` with the default timeout and poll interval
    #[must_use]
    pub const fn new(session: S) -> Self {
        Self {
            session,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the timeout used when a call does not give one
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Default timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Borrow the wrapped session
    #[must_use]
    pub const fn session(&self) -> &S {
        &self.session
    }

    /// Give the session back
    #[must_use]
    pub fn into_session(self) -> S {
        self.session
    }

    /// First element matching `by`, once it is visible
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Driver`] on a non-recoverable driver fault.
    pub async fn find_visible(&self, by: &By) -> ProbeResult<Option<S::Element>> {
        self.find_visible_within(by, self.timeout).await
    }

    /// [`Self::find_visible`] with an explicit timeout
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Driver`] on a non-recoverable driver fault.
    pub async fn find_visible_within(
        &self,
        by: &By,
        timeout: Duration,
    ) -> ProbeResult<Option<S::Element>> {
        let found = self
            .poll(by, timeout, |elements| async move {
                let Some(first) = elements.into_iter().next() else {
                    return Ok(None);
                };
                Ok(first.is_displayed().await?.then_some(first))
            })
            .await?;
        Ok(found)
    }

    /// Every element matching `by`, in document order, once all are visible
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Driver`] on a non-recoverable driver fault.
    pub async fn find_all_visible(&self, by: &By) -> ProbeResult<Vec<S::Element>> {
        self.find_all_visible_within(by, self.timeout).await
    }

    /// [`Self::find_all_visible`] with an explicit timeout
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Driver`] on a non-recoverable driver fault.
    pub async fn find_all_visible_within(
        &self,
        by: &By,
        timeout: Duration,
    ) -> ProbeResult<Vec<S::Element>> {
        let found = self
            .poll(by, timeout, |elements| async move {
                if elements.is_empty() {
                    return Ok(None);
                }
                for element in &elements {
                    if !element.is_displayed().await? {
                        return Ok(None);
                    }
                }
                Ok(Some(elements))
            })
            .await?;
        Ok(found.unwrap_or_default())
    }

    /// [`Self::find_visible`], turning a miss into [`ProbeError::ElementNotFound`]
    ///
    /// # Errors
    ///
    /// Returns an error if the element never became visible or the driver faulted.
    pub async fn require(&self, by: &By) -> ProbeResult<S::Element> {
        self.find_visible(by)
            .await?
            .ok_or_else(|| ProbeError::ElementNotFound {
                locator: by.to_string(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })
    }

    /// Visible element with the given id
    ///
    /// # Errors
    ///
    /// See [`Self::find_visible`].
    pub async fn by_id(&self, id: &str) -> ProbeResult<Option<S::Element>> {
        self.find_visible(&By::id(id)).await
    }

    /// Visible elements with the given id
    ///
    /// # Errors
    ///
    /// See [`Self::find_all_visible`].
    pub async fn all_by_id(&self, id: &str) -> ProbeResult<Vec<S::Element>> {
        self.find_all_visible(&By::id(id)).await
    }

    /// Visible form field with the given name
    ///
    /// # Errors
    ///
    /// See [`Self::find_visible`].
    pub async fn by_name(&self, name: &str) -> ProbeResult<Option<S::Element>> {
        self.find_visible(&By::name(name)).await
    }

    /// Visible element matching an XPath expression
    ///
    /// # Errors
    ///
    /// See [`Self::find_visible`].
    pub async fn by_xpath(&self, xpath: &str) -> ProbeResult<Option<S::Element>> {
        self.find_visible(&By::xpath(xpath)).await
    }

    /// Visible elements matching an XPath expression
    ///
    /// # Errors
    ///
    /// See [`Self::find_all_visible`].
    pub async fn all_by_xpath(&self, xpath: &str) -> ProbeResult<Vec<S::Element>> {
        self.find_all_visible(&By::xpath(xpath)).await
    }

    /// Query, check, sleep, repeat. `check` returns `Ok(None)` for "not yet".
    async fn poll<T, F, Fut>(&self, by: &By, timeout: Duration, check: F) -> ProbeResult<Option<T>>
    where
        F: Fn(Vec<S::Element>) -> Fut,
        Fut: std::future::Future<Output = Result<Option<T>, DriverFault>>,
    {
        // An unrepresentable deadline means "wait forever"
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let attempt = match self.session.find_elements(by).await {
                Ok(elements) => check(elements).await,
                Err(fault) => Err(fault),
            };
            match attempt {
                Ok(Some(found)) => return Ok(Some(found)),
                Ok(None) => {}
                Err(fault) if fault.is_miss() => trace!(locator = %by, %fault, "lookup miss"),
                Err(fault) => return Err(fault.into()),
            }

            let pause = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        debug!(locator = %by, ?timeout, "element not visible before timeout");
                        return Ok(None);
                    }
                    self.poll_interval.min(remaining)
                }
                None => self.poll_interval,
            };
            tokio::time::sleep(pause).await;
        }
    }
}
