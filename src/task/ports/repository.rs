//! Repository port for owner-scoped task persistence.

use crate::storage::{memory::PoisonedStore, postgres::StorageFailure};
use crate::task::domain::{NewTask, Task, TaskChangeset, TaskId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Writes that take an owner only touch a task when both the task identifier
/// and the owner match, in a single atomic step.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::OwnerNotFound`] when the owning user
    /// does not exist.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier regardless of owner.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Applies `changes` to the task when `owner` owns it.
    ///
    /// Returns `None` when the task does not exist or belongs to someone
    /// else.
    async fn update_owned(
        &self,
        owner: UserId,
        id: TaskId,
        changes: &TaskChangeset,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Deletes the task when `owner` owns it.
    ///
    /// Returns `false` when the task does not exist or belongs to someone
    /// else.
    async fn delete_owned(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The owning user does not exist.
    #[error("task owner not found: {0}")]
    OwnerNotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<StorageFailure> for TaskRepositoryError {
    fn from(err: StorageFailure) -> Self {
        Self::persistence(err)
    }
}

impl From<PoisonedStore> for TaskRepositoryError {
    fn from(err: PoisonedStore) -> Self {
        Self::persistence(err)
    }
}
