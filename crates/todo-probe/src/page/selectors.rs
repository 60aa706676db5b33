//! Locators of the to-do web UI.
//!
//! The page is bound with knockout `data-bind` attributes; selectors match on
//! those bindings rather than on layout.

/// Delete button of a task row
pub const DELETE_TASK_BUTTON: &str = "//button[contains(@data-bind, 'click: $parent.remove')]";
/// "In progress" button of a task row
pub const MARK_IN_PROGRESS_BUTTON: &str = "//button[contains(@data-bind, 'click: $parent.markInProgress')]";
/// "Done" button of a task row
pub const MARK_DONE_BUTTON: &str = "//button[contains(@data-bind, 'click: $parent.markDone')]";
/// Task title
pub const TASK_TITLE: &str = "//b[contains(@data-bind, 'text: title')]";
/// Task owner
pub const TASK_OWNER: &str = "//b[contains(@data-bind, 'text: username')]";
/// Tag labels of a task
pub const TASK_TAGS: &str = "//span[contains(@data-bind, 'text: tag.name')]";
/// Creation date of a task
pub const TASK_DATE: &str = "//span[contains(@data-bind, 'text: date')]";
/// Status label, rendered only for finished tasks
pub const DONE_LABEL: &str = "//span[contains(@class, 'label label-')]";
/// Rows of the task table, header included
pub const TASK_TABLE_ROWS: &str = "//table[contains(@class, 'table table-striped')]//tr";
/// Sign-out button, present only while logged in
pub const SIGN_OUT_BUTTON: &str = "//button[contains(@data-bind, 'click: logout')]";

/// Login form username field (`name`)
pub const USERNAME_FIELD: &str = "username";
/// Login form password field (`name`)
pub const PASSWORD_FIELD: &str = "password";

/// Opens the creation form (`id`)
pub const ADD_TASK_BUTTON: &str = "btn-add";
/// Title input, shared by the creation and edit forms
pub const TITLE_INPUT: &str = "//input[contains(@data-bind, 'value: title')]";
/// Space-separated tags input of the creation form
pub const TAGS_INPUT: &str = "//input[contains(@data-bind, 'value: tags')]";
/// Creation form submit
pub const ADD_TASK_CONFIRM: &str = "//button[contains(@data-bind, 'click:addTask')]";

/// Opens the edit form of a task row
pub const EDIT_TASK_BUTTON: &str = "//button[contains(@data-bind, 'click: $parent.beginEdit')]";
/// One input per existing tag in the edit form (`id`)
pub const EDIT_TAG_INPUTS: &str = "inputTags";
/// Done checkbox of the edit form
pub const DONE_CHECKBOX: &str = "//input[contains(@data-bind, 'checked: done')]";
/// Edit form submit
pub const EDIT_TASK_CONFIRM: &str = "//button[contains(@data-bind, 'click:editTask')]";
