//! Login and logout.

use std::sync::Arc;
use tracing::debug;

use super::selectors;
use crate::driver::{By, DomElement, DomSession};
use crate::locator::ElementLocator;
use crate::result::ProbeResult;

/// Login form and sign-out button
#[derive(Debug)]
pub struct SessionControls<S> {
    locator: Arc<ElementLocator<S>>,
}

impl<S: DomSession> SessionControls<S> {
    pub(crate) const fn new(locator: Arc<ElementLocator<S>>) -> Self {
        Self { locator }
    }

    /// Fill the login form and submit it with Enter
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::ElementNotFound`] if a login field never shows up.
    pub async fn login(&self, username: &str, password: &str) -> ProbeResult<()> {
        debug!(username, "logging in");
        let username_field = self.locator.require(&By::name(selectors::USERNAME_FIELD)).await?;
        username_field.clear().await?;
        username_field.send_keys(username).await?;

        let password_field = self.locator.require(&By::name(selectors::PASSWORD_FIELD)).await?;
        password_field.clear().await?;
        password_field.send_keys(password).await?;
        password_field.press_enter().await?;
        Ok(())
    }

    /// Click the sign-out button
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::ElementNotFound`] if nobody is logged in.
    pub async fn logout(&self) -> ProbeResult<()> {
        self.locator.require(&By::xpath(selectors::SIGN_OUT_BUTTON)).await?.click().await?;
        Ok(())
    }

    /// The sign-out button, if it becomes visible
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Driver`] on a driver fault.
    pub async fn sign_out_button(&self) -> ProbeResult<Option<S::Element>> {
        self.locator.by_xpath(selectors::SIGN_OUT_BUTTON).await
    }

    /// Whether someone is logged in
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Driver`] on a driver fault.
    pub async fn is_logged_in(&self) -> ProbeResult<bool> {
        Ok(self.sign_out_button().await?.is_some())
    }
}
