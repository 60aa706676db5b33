//! Record verification shared by the API and UI suites.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::records::{TagDetail, Task};
use crate::result::{ProbeError, ProbeResult};

/// Format the service uses for task dates
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Maximum distance between a fresh task's date and now
pub const MAX_TASK_AGE_SECS: i64 = 60;

/// What a freshly created or edited task should look like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedTask {
    /// Title
    pub title: String,
    /// Tag names, compared order-insensitively
    pub tags: Vec<String>,
    /// Owner
    pub username: String,
    /// Completion flag
    pub done: bool,
}

impl ExpectedTask {
    /// Expect an open task with no tags
    #[must_use]
    pub fn new(title: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: Vec::new(),
            username: username.into(),
            done: false,
        }
    }

    /// Expect these tags
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Expect this completion flag
    #[must_use]
    pub const fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Check `task` against the expectation, dating it against the clock
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] naming the first mismatching field.
    pub fn check(&self, task: &Task) -> ProbeResult<()> {
        self.check_at(task, Utc::now())
    }

    /// Check `task` against the expectation as of `now`
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] naming the first mismatching field.
    pub fn check_at(&self, task: &Task, now: DateTime<Utc>) -> ProbeResult<()> {
        if task.title != self.title {
            return Err(ProbeError::assertion(format!(
                "Created task has incorrect title, expected '{}', got '{}'",
                self.title, task.title
            )));
        }
        if task.username != self.username {
            return Err(ProbeError::assertion(format!(
                "Created task has incorrect username, expected '{}', got '{}'",
                self.username, task.username
            )));
        }
        if task.done != self.done {
            return Err(ProbeError::assertion(format!(
                "Created task has incorrect done status, expected '{}', got '{}'",
                self.done, task.done
            )));
        }

        let mut expected: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        let mut actual = task.tag_names();
        expected.sort_unstable();
        actual.sort_unstable();
        if expected != actual {
            return Err(ProbeError::assertion(format!(
                "Created task has incorrect tags, expected '{}', got '{}'",
                expected.join(", "),
                actual.join(", ")
            )));
        }

        let created = parse_task_date(&task.date)?;
        let age = now.signed_duration_since(created).num_seconds().abs();
        if age >= MAX_TASK_AGE_SECS {
            return Err(ProbeError::assertion(format!(
                "Created task has incorrect date '{}', {age}s away from now",
                task.date
            )));
        }
        Ok(())
    }
}

/// Parse a task date as UTC
///
/// # Errors
///
/// Returns [`ProbeError::AssertionFailed`] if the date does not use [`DATE_FORMAT`].
pub fn parse_task_date(date: &str) -> ProbeResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(date, DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| ProbeError::assertion(format!("Task date '{date}' is malformed: {e}")))
}

/// Check a tag detail's name and linked titles (order-insensitive)
///
/// # Errors
///
/// Returns [`ProbeError::AssertionFailed`] on mismatch.
pub fn check_tag_details(detail: &TagDetail, tag: &str, titles: &[&str]) -> ProbeResult<()> {
    if detail.tag != tag {
        return Err(ProbeError::assertion(format!(
            "Got incorrect tag name in tag details, expected '{tag}', got '{}'",
            detail.tag
        )));
    }
    let mut expected = titles.to_vec();
    let mut actual: Vec<&str> = detail.tasks.iter().map(String::as_str).collect();
    expected.sort_unstable();
    actual.sort_unstable();
    if expected != actual {
        return Err(ProbeError::assertion(format!(
            "Incorrect task titles linked to the tag, expected '{}', got '{}'",
            expected.join(", "),
            actual.join(", ")
        )));
    }
    Ok(())
}
