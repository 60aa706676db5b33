//! Task creation form.

use std::sync::Arc;

use super::selectors;
use crate::driver::{By, DomElement, DomSession};
use crate::locator::ElementLocator;
use crate::result::ProbeResult;

/// The "add task" dialog
#[derive(Debug)]
pub struct CreateForm<S> {
    locator: Arc<ElementLocator<S>>,
}

impl<S: DomSession> CreateForm<S> {
    pub(crate) const fn new(locator: Arc<ElementLocator<S>>) -> Self {
        Self { locator }
    }

    /// Open the form, fill title and space-separated tags, submit
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::ElementNotFound`] if a form control never shows up.
    pub async fn add_task<T: AsRef<str>>(&self, title: &str, tags: &[T]) -> ProbeResult<()> {
        let tags = tags.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");

        self.locator.require(&By::id(selectors::ADD_TASK_BUTTON)).await?.click().await?;

        let title_field = self.locator.require(&By::xpath(selectors::TITLE_INPUT)).await?;
        let tags_field = self.locator.require(&By::xpath(selectors::TAGS_INPUT)).await?;
        title_field.clear().await?;
        tags_field.clear().await?;
        title_field.send_keys(title).await?;
        tags_field.send_keys(&tags).await?;

        self.locator.require(&By::xpath(selectors::ADD_TASK_CONFIRM)).await?.click().await?;
        Ok(())
    }
}
