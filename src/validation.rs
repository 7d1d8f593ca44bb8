//! Field-level validation rules shared by the user and task services.
//!
//! Every rule is a pure function. Emptiness checks reject the empty string
//! only: whitespace is neither trimmed nor rejected at this layer.

use thiserror::Error;

/// Canonical representation of a task that has not been started.
pub const STATUS_TODO: &str = "todo";
/// Canonical representation of a task that is being worked on.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// Canonical representation of a finished task.
pub const STATUS_DONE: &str = "done";

/// Lowest accepted task priority.
pub const MIN_PRIORITY: i64 = 1;
/// Highest accepted task priority.
pub const MAX_PRIORITY: i64 = 5;

/// Client-supplied data violates a domain rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The task title is the empty string.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The user name is the empty string.
    #[error("user name must not be empty")]
    EmptyName,

    /// The user email is the empty string.
    #[error("user email must not be empty")]
    EmptyEmail,

    /// The task status is not one of `todo`, `in_progress` or `done`.
    #[error("invalid task status '{0}', expected todo, in_progress or done")]
    BadStatus(String),

    /// The task priority lies outside `1..=5`.
    #[error("invalid task priority {0}, expected a value between 1 and 5")]
    BadPriority(i64),
}

/// Returns `true` when `status` is exactly one of the canonical task statuses.
///
/// The comparison is case-sensitive: `"Done"` is not a valid status.
#[must_use]
pub fn is_valid_status(status: &str) -> bool {
    matches!(status, STATUS_TODO | STATUS_IN_PROGRESS | STATUS_DONE)
}

/// Returns `true` when `priority` lies within `1..=5`.
#[must_use]
pub const fn is_valid_priority(priority: i64) -> bool {
    priority >= MIN_PRIORITY && priority <= MAX_PRIORITY
}

/// Rejects an empty task title.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyTitle`] when `title` is empty.
pub const fn require_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// Rejects an empty user name.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] when `name` is empty.
pub const fn require_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Rejects an empty user email.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyEmail`] when `email` is empty.
pub const fn require_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    Ok(())
}

/// Rejects a status outside the canonical set.
///
/// # Errors
///
/// Returns [`ValidationError::BadStatus`] carrying the rejected value.
pub fn require_status(status: &str) -> Result<(), ValidationError> {
    if !is_valid_status(status) {
        return Err(ValidationError::BadStatus(status.to_owned()));
    }
    Ok(())
}

/// Rejects a priority outside `1..=5`.
///
/// # Errors
///
/// Returns [`ValidationError::BadPriority`] carrying the rejected value.
pub const fn require_priority(priority: i64) -> Result<(), ValidationError> {
    if !is_valid_priority(priority) {
        return Err(ValidationError::BadPriority(priority));
    }
    Ok(())
}
