//! Field-level task changes, including the tri-state due date.

use super::{Priority, TaskStatus};
use chrono::{DateTime, Utc};

/// How a write treats the stored due date.
///
/// A patch distinguishes "leave it alone" from "clear it" and from "set it".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DueAtChange {
    /// Leave the stored due date untouched.
    #[default]
    Keep,
    /// Remove the stored due date.
    Clear,
    /// Store the given due date.
    Set(DateTime<Utc>),
}

impl DueAtChange {
    /// Builds the change from a "field present" flag and its value.
    ///
    /// A present field with no value clears the due date.
    #[must_use]
    pub const fn from_parts(provided: bool, value: Option<DateTime<Utc>>) -> Self {
        match (provided, value) {
            (false, _) => Self::Keep,
            (true, None) => Self::Clear,
            (true, Some(due_at)) => Self::Set(due_at),
        }
    }

    /// Full-replacement semantics: an absent value clears the due date.
    #[must_use]
    pub const fn replace_with(value: Option<DateTime<Utc>>) -> Self {
        Self::from_parts(true, value)
    }

    /// Returns `true` when the change leaves the due date untouched.
    #[must_use]
    pub const fn is_keep(self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Column form: outer `None` skips the column, inner `None` writes NULL.
    #[must_use]
    pub const fn as_column(self) -> Option<Option<DateTime<Utc>>> {
        match self {
            Self::Keep => None,
            Self::Clear => Some(None),
            Self::Set(due_at) => Some(Some(due_at)),
        }
    }
}

/// Field-level changes to apply to a stored task.
///
/// Absent fields are left untouched; `updated_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChangeset {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    due_at: DueAtChange,
    updated_at: DateTime<Utc>,
}

impl TaskChangeset {
    /// Creates a changeset that only refreshes `updated_at`.
    #[must_use]
    pub const fn new(updated_at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            description: None,
            status: None,
            priority: None,
            due_at: DueAtChange::Keep,
            updated_at,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date change.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DueAtChange) -> Self {
        self.due_at = due_at;
        self
    }

    /// Returns `true` when at least one task field changes.
    #[must_use]
    pub const fn touches_fields(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.status.is_some()
            || self.priority.is_some()
            || !self.due_at.is_keep()
    }

    /// Returns the new title, if supplied.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the new description, if supplied.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new status, if supplied.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the new priority, if supplied.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the due date change.
    #[must_use]
    pub const fn due_at(&self) -> DueAtChange {
        self.due_at
    }

    /// Returns the timestamp written as `updated_at`.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
