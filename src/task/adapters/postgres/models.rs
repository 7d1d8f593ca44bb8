//! Diesel row models for task persistence.

use crate::storage::postgres::schema::tasks;
use crate::task::domain::{
    NewTask, PersistedTaskData, Priority, Task, TaskChangeset, TaskId, TaskStatus,
};
use crate::task::ports::{TaskRepositoryError, TaskRepositoryResult};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status in its storage form.
    pub status: String,
    /// Priority between 1 and 5.
    pub priority: i16,
    /// Optional due date.
    pub due_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = TaskRepositoryError;

    fn try_from(row: TaskRow) -> TaskRepositoryResult<Self> {
        let status =
            TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
        let priority =
            Priority::new(i64::from(row.priority)).map_err(TaskRepositoryError::persistence)?;

        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::new(row.id),
            user_id: UserId::new(row.user_id),
            title: row.title,
            description: row.description,
            status,
            priority,
            due_at: row.due_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning user.
    pub user_id: i64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status in its storage form.
    pub status: String,
    /// Priority between 1 and 5.
    pub priority: i16,
    /// Optional due date.
    pub due_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Initial mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&NewTask> for NewTaskRow {
    fn from(task: &NewTask) -> Self {
        Self {
            user_id: task.user_id.into_inner(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.as_str().to_owned(),
            priority: task.priority.value(),
            due_at: task.due_at,
            created_at: task.created_at,
            updated_at: task.created_at,
        }
    }
}

/// Partial update model; `None` columns are left out of the `SET` clause.
///
/// `due_at` is doubly optional: `Some(None)` writes NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangesetRow {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New status.
    pub status: Option<String>,
    /// New priority.
    pub priority: Option<i16>,
    /// Due date change.
    pub due_at: Option<Option<DateTime<Utc>>>,
    /// Mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&TaskChangeset> for TaskChangesetRow {
    fn from(changes: &TaskChangeset) -> Self {
        Self {
            title: changes.title().map(str::to_owned),
            description: changes.description().map(str::to_owned),
            status: changes.status().map(|status| status.as_str().to_owned()),
            priority: changes.priority().map(Priority::value),
            due_at: changes.due_at().as_column(),
            updated_at: changes.updated_at(),
        }
    }
}
