//! Task table on the main page.
//!
//! The suites only ever work with a single task on screen, so every reader
//! looks at the first visible match.

use std::sync::Arc;

use super::selectors;
use crate::driver::{By, DomElement, DomSession};
use crate::locator::ElementLocator;
use crate::records::{TagEntry, Task};
use crate::result::ProbeResult;

/// Buttons and readers for the task table
#[derive(Debug)]
pub struct TaskList<S> {
    locator: Arc<ElementLocator<S>>,
}

impl<S: DomSession> TaskList<S> {
    pub(crate) const fn new(locator: Arc<ElementLocator<S>>) -> Self {
        Self { locator }
    }

    /// Click the delete button
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::ElementNotFound`] if the button never shows up.
    pub async fn delete_task(&self) -> ProbeResult<()> {
        self.click(selectors::DELETE_TASK_BUTTON).await
    }

    /// Click the "done" button
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::ElementNotFound`] if the button never shows up.
    pub async fn mark_done(&self) -> ProbeResult<()> {
        self.click(selectors::MARK_DONE_BUTTON).await
    }

    /// Click the "in progress" button
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::ElementNotFound`] if the button never shows up.
    pub async fn mark_in_progress(&self) -> ProbeResult<()> {
        self.click(selectors::MARK_IN_PROGRESS_BUTTON).await
    }

    /// Task title
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::ElementNotFound`] if no title is visible.
    pub async fn title(&self) -> ProbeResult<String> {
        self.text(selectors::TASK_TITLE).await
    }

    /// Task owner
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::ElementNotFound`] if no owner is visible.
    pub async fn owner(&self) -> ProbeResult<String> {
        self.text(selectors::TASK_OWNER).await
    }

    /// Tag labels in page order; empty if the task has none
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Driver`] on a driver fault.
    pub async fn tags(&self) -> ProbeResult<Vec<String>> {
        let elements = self.locator.all_by_xpath(selectors::TASK_TAGS).await?;
        let mut tags = Vec::with_capacity(elements.len());
        for element in &elements {
            tags.push(element.text().await?);
        }
        Ok(tags)
    }

    /// Creation date as rendered
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::ElementNotFound`] if no date is visible.
    pub async fn date(&self) -> ProbeResult<String> {
        self.text(selectors::TASK_DATE).await
    }

    /// Whether the status label is shown
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Driver`] on a driver fault.
    pub async fn is_done(&self) -> ProbeResult<bool> {
        Ok(self.locator.by_xpath(selectors::DONE_LABEL).await?.is_some())
    }

    /// Rows of the task table, header row included
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Driver`] on a driver fault.
    pub async fn rows(&self) -> ProbeResult<Vec<S::Element>> {
        self.locator.all_by_xpath(selectors::TASK_TABLE_ROWS).await
    }

    /// Number of tasks in the table
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Driver`] on a driver fault.
    pub async fn task_count(&self) -> ProbeResult<usize> {
        Ok(self.rows().await?.len().saturating_sub(1))
    }

    /// Everything the page shows about the task, as a [`Task`]
    ///
    /// # Errors
    ///
    /// Returns an error if title, owner or date is missing.
    pub async fn task_info(&self) -> ProbeResult<Task> {
        Ok(Task {
            id: None,
            title: self.title().await?,
            username: self.owner().await?,
            tags: self.tags().await?.into_iter().map(TagEntry::Name).collect(),
            date: self.date().await?,
            done: self.is_done().await?,
        })
    }

    async fn click(&self, xpath: &str) -> ProbeResult<()> {
        self.locator.require(&By::xpath(xpath)).await?.click().await?;
        Ok(())
    }

    async fn text(&self, xpath: &str) -> ProbeResult<String> {
        Ok(self.locator.require(&By::xpath(xpath)).await?.text().await?)
    }
}
