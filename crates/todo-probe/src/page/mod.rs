//! Page object for the to-do web UI.
//!
//! [`TodoPage`] is composed of one component per area of the page. Each
//! component shares the same [`ElementLocator`], so they all see one browser
//! session and one timeout.
//!
//! ```ignore
//! let page = TodoPage::open(ElementLocator::new(session), &config.web_url).await?;
//! page.session.login("QA", "willWin").await?;
//! page.create.add_task("Test title", &["tag1", "tag2"]).await?;
//! let task = page.tasks.task_info().await?;
//! ```

mod create_form;
mod edit_form;
mod navigation;
pub mod selectors;
mod session;
mod task_list;

pub use create_form::CreateForm;
pub use edit_form::{EditForm, TaskEdit};
pub use navigation::Navigation;
pub use session::SessionControls;
pub use task_list::TaskList;

use std::sync::Arc;

use crate::driver::DomSession;
use crate::locator::ElementLocator;
use crate::records::Task;
use crate::result::ProbeResult;

/// The single page of the to-do web UI
#[derive(Debug)]
pub struct TodoPage<S> {
    /// Open and reload
    pub nav: Navigation<S>,
    /// Task table
    pub tasks: TaskList<S>,
    /// Creation form
    pub create: CreateForm<S>,
    /// Edit form
    pub edit: EditForm<S>,
    /// Login and logout
    pub session: SessionControls<S>,
    locator: Arc<ElementLocator<S>>,
}

impl<S: DomSession> TodoPage<S> {
    /// Build the page object without navigating
    #[must_use]
    pub fn new(locator: ElementLocator<S>, url: impl Into<String>) -> Self {
        let locator = Arc::new(locator);
        Self {
            nav: Navigation::new(Arc::clone(&locator), url),
            tasks: TaskList::new(Arc::clone(&locator)),
            create: CreateForm::new(Arc::clone(&locator)),
            edit: EditForm::new(Arc::clone(&locator)),
            session: SessionControls::new(Arc::clone(&locator)),
            locator,
        }
    }

    /// Build the page object and navigate to `url`
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Driver`] if navigation fails.
    pub async fn open(locator: ElementLocator<S>, url: impl Into<String>) -> ProbeResult<Self> {
        let page = Self::new(locator, url);
        page.nav.open().await?;
        Ok(page)
    }

    /// Shared locator
    #[must_use]
    pub fn locator(&self) -> &ElementLocator<S> {
        &self.locator
    }

    /// See [`SessionControls::login`]
    ///
    /// # Errors
    ///
    /// See [`SessionControls::login`].
    pub async fn login(&self, username: &str, password: &str) -> ProbeResult<()> {
        self.session.login(username, password).await
    }

    /// See [`SessionControls::logout`]
    ///
    /// # Errors
    ///
    /// See [`SessionControls::logout`].
    pub async fn logout(&self) -> ProbeResult<()> {
        self.session.logout().await
    }

    /// See [`CreateForm::add_task`]
    ///
    /// # Errors
    ///
    /// See [`CreateForm::add_task`].
    pub async fn add_task<T: AsRef<str>>(&self, title: &str, tags: &[T]) -> ProbeResult<()> {
        self.create.add_task(title, tags).await
    }

    /// See [`EditForm::edit_task`]
    ///
    /// # Errors
    ///
    /// See [`EditForm::edit_task`].
    pub async fn edit_task(&self, edit: &TaskEdit) -> ProbeResult<()> {
        self.edit.edit_task(edit).await
    }

    /// See [`TaskList::delete_task`]
    ///
    /// # Errors
    ///
    /// See [`TaskList::delete_task`].
    pub async fn delete_task(&self) -> ProbeResult<()> {
        self.tasks.delete_task().await
    }

    /// See [`TaskList::mark_done`]
    ///
    /// # Errors
    ///
    /// See [`TaskList::mark_done`].
    pub async fn mark_done(&self) -> ProbeResult<()> {
        self.tasks.mark_done().await
    }

    /// See [`TaskList::mark_in_progress`]
    ///
    /// # Errors
    ///
    /// See [`TaskList::mark_in_progress`].
    pub async fn mark_in_progress(&self) -> ProbeResult<()> {
        self.tasks.mark_in_progress().await
    }

    /// See [`TaskList::task_info`]
    ///
    /// # Errors
    ///
    /// See [`TaskList::task_info`].
    pub async fn task_info(&self) -> ProbeResult<Task> {
        self.tasks.task_info().await
    }

    /// See [`Navigation::refresh`]
    ///
    /// # Errors
    ///
    /// See [`Navigation::refresh`].
    pub async fn refresh(&self) -> ProbeResult<()> {
        self.nav.refresh().await
    }
}
