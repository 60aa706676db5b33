//! Task edit form.

use std::sync::Arc;

use super::selectors;
use crate::driver::{By, DomElement, DomSession};
use crate::locator::ElementLocator;
use crate::result::ProbeResult;

/// Changes to apply through the edit form; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// New title
    pub title: Option<String>,
    /// Replacement tags, written into the existing tag inputs
    pub tags: Option<Vec<String>>,
    /// Toggle the done checkbox
    pub done: Option<bool>,
}

impl TaskEdit {
    /// No changes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the tags
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Toggle the done checkbox
    #[must_use]
    pub const fn with_done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }
}

/// The inline edit form of a task row
#[derive(Debug)]
pub struct EditForm<S> {
    locator: Arc<ElementLocator<S>>,
}

impl<S: DomSession> EditForm<S> {
    pub(crate) const fn new(locator: Arc<ElementLocator<S>>) -> Self {
        Self { locator }
    }

    /// Open the form, apply `edit`, submit
    ///
    /// The form has one input per existing tag and no way to add more. Tags
    /// are rewritten only when there are fewer of them than inputs: every
    /// input is cleared, then filled in order. Otherwise the inputs are left
    /// as they are. The checkbox is clicked once whenever `done` is set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::ElementNotFound`] if a form control never shows up.
    pub async fn edit_task(&self, edit: &TaskEdit) -> ProbeResult<()> {
        self.locator.require(&By::xpath(selectors::EDIT_TASK_BUTTON)).await?.click().await?;

        if let Some(title) = edit.title.as_deref().filter(|t| !t.is_empty()) {
            let field = self.locator.require(&By::xpath(selectors::TITLE_INPUT)).await?;
            field.click().await?;
            field.clear().await?;
            field.send_keys(title).await?;
        }

        if let Some(tags) = edit.tags.as_ref().filter(|t| !t.is_empty()) {
            let inputs = self.locator.all_by_id(selectors::EDIT_TAG_INPUTS).await?;
            if tags.len() < inputs.len() {
                for input in &inputs {
                    input.clear().await?;
                }
                for (input, tag) in inputs.iter().zip(tags) {
                    input.send_keys(tag).await?;
                }
            }
        }

        if edit.done.is_some() {
            self.locator.require(&By::xpath(selectors::DONE_CHECKBOX)).await?.click().await?;
        }

        self.locator.require(&By::xpath(selectors::EDIT_TASK_CONFIRM)).await?.click().await?;
        Ok(())
    }
}
