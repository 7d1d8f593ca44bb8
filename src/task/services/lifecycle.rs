//! Service layer for owner-scoped task creation, retrieval and mutation.

use crate::error::ErrorKind;
use crate::task::{
    domain::{DueAtChange, NewTask, Priority, Task, TaskChangeset, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::UserId,
    ports::{UserRepository, UserRepositoryError},
};
use crate::validation::{ValidationError, require_title};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for creating a task.
///
/// An empty status defaults to `todo` and a zero priority defaults to `3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    user_id: UserId,
    title: String,
    description: String,
    status: Option<String>,
    priority: Option<i64>,
    due_at: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the owner and title; everything else defaults.
    #[must_use]
    pub fn new(user_id: UserId, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            description: String::new(),
            status: None,
            priority: None,
            due_at: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the raw status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the raw priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }
}

/// Request payload for replacing every mutable field of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceTaskRequest {
    title: String,
    description: String,
    status: String,
    priority: i64,
    due_at: Option<DateTime<Utc>>,
}

impl ReplaceTaskRequest {
    /// Creates a full-replacement request; a `None` due date clears it.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
        priority: i64,
        due_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: status.into(),
            priority,
            due_at,
        }
    }
}

/// Request payload for changing only the supplied task fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<i64>,
    due_at: DueAtChange,
}

impl PatchTaskRequest {
    /// Creates a patch that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the new raw status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the new raw priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date change.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DueAtChange) -> Self {
        self.due_at = due_at;
        self
    }

    /// Returns `true` when no field was supplied and the due date is kept.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_at.is_keep()
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Supplied data violates a domain rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The owning user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The task does not exist or belongs to another user.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// User repository operation failed during the owner check.
    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),
}

impl TaskServiceError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::UserNotFound(_) | Self::NotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::UserRepository(_) => ErrorKind::Store,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service; the sole authority on legal task mutations
/// and on ownership enforcement.
#[derive(Clone)]
pub struct TaskService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, U, C> TaskService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            clock,
        }
    }

    /// Creates a task for an existing user.
    ///
    /// Defaults are applied first, then the title, status and priority are
    /// checked in that order. The owner is looked up only once the input is
    /// valid.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for the first failing rule,
    /// [`TaskServiceError::UserNotFound`] when the owner does not exist and
    /// [`TaskServiceError::Repository`] when persistence fails.
    #[instrument(
        name = "taskmanager.task.create",
        skip(self, request),
        fields(user_id = %request.user_id)
    )]
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            user_id,
            title,
            description,
            status: raw_status,
            priority: raw_priority,
            due_at,
        } = request;
        require_title(&title)?;
        let status = raw_status
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map_or(Ok(TaskStatus::default()), TaskStatus::try_from)?;
        let priority = raw_priority
            .filter(|raw| *raw != 0)
            .map_or(Ok(Priority::DEFAULT), Priority::new)?;

        let owner = self
            .users
            .find_by_id(user_id)
            .await
            .inspect_err(|err| warn!(error = %err, "user store call failed"))?;
        if owner.is_none() {
            return Err(TaskServiceError::UserNotFound(user_id));
        }

        let new_task = NewTask {
            user_id,
            title,
            description,
            status,
            priority,
            due_at,
            created_at: self.now(),
        };
        let task = self
            .tasks
            .insert(&new_task)
            .await
            .inspect_err(log_store_failure)
            .map_err(|err| match err {
                TaskRepositoryError::OwnerNotFound(owner) => TaskServiceError::UserNotFound(owner),
                other => TaskServiceError::Repository(other),
            })?;
        info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier without an ownership check.
    ///
    /// Callers exposing the result externally must check the owner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist.
    #[instrument(name = "taskmanager.task.get", skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        debug!("loading task");
        self.tasks
            .find_by_id(id)
            .await
            .inspect_err(log_store_failure)?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Retrieves a task owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist or
    /// belongs to another user.
    #[instrument(
        name = "taskmanager.task.get_by_owner",
        skip(self),
        fields(user_id = %user_id, task_id = %id)
    )]
    pub async fn get_task_by_owner(&self, user_id: UserId, id: TaskId) -> TaskServiceResult<Task> {
        debug!("loading owned task");
        self.owned_task(user_id, id).await
    }

    /// Returns every task owned by `user_id`, newest first.
    ///
    /// An unknown user simply owns no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence fails.
    #[instrument(name = "taskmanager.task.list_by_owner", skip(self), fields(user_id = %user_id))]
    pub async fn list_tasks_by_owner(&self, user_id: UserId) -> TaskServiceResult<Vec<Task>> {
        let tasks = self
            .tasks
            .list_by_owner(user_id)
            .await
            .inspect_err(log_store_failure)?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Replaces every mutable field of an owned task.
    ///
    /// The write is conditioned on both the task identifier and the owner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for the first failing rule
    /// and [`TaskServiceError::NotFound`] when the task does not exist or
    /// belongs to another user.
    #[instrument(
        name = "taskmanager.task.replace",
        skip(self, request),
        fields(user_id = %user_id, task_id = %id)
    )]
    pub async fn replace_task(
        &self,
        user_id: UserId,
        id: TaskId,
        request: ReplaceTaskRequest,
    ) -> TaskServiceResult<Task> {
        let ReplaceTaskRequest {
            title,
            description,
            status: raw_status,
            priority: raw_priority,
            due_at,
        } = request;
        require_title(&title)?;
        let status = TaskStatus::try_from(raw_status.as_str())?;
        let priority = Priority::new(raw_priority)?;

        let changes = TaskChangeset::new(self.now())
            .with_title(title)
            .with_description(description)
            .with_status(status)
            .with_priority(priority)
            .with_due_at(DueAtChange::replace_with(due_at));
        let task = self.write_owned(user_id, id, &changes).await?;
        info!("task replaced");
        Ok(task)
    }

    /// Changes only the supplied fields of an owned task.
    ///
    /// Ownership is confirmed before any field is validated. A patch without
    /// fields returns the stored task unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist or
    /// belongs to another user, and [`TaskServiceError::Validation`] for the
    /// first supplied field that fails a rule.
    #[instrument(
        name = "taskmanager.task.patch",
        skip(self, request),
        fields(user_id = %user_id, task_id = %id)
    )]
    pub async fn patch_task(
        &self,
        user_id: UserId,
        id: TaskId,
        request: PatchTaskRequest,
    ) -> TaskServiceResult<Task> {
        let current = self.owned_task(user_id, id).await?;
        if request.is_empty() {
            debug!("empty patch, returning current task");
            return Ok(current);
        }

        let PatchTaskRequest {
            title,
            description,
            status,
            priority,
            due_at,
        } = request;
        let mut changes = TaskChangeset::new(self.now()).with_due_at(due_at);
        if let Some(new_title) = title {
            require_title(&new_title)?;
            changes = changes.with_title(new_title);
        }
        if let Some(raw_status) = status {
            changes = changes.with_status(TaskStatus::try_from(raw_status.as_str())?);
        }
        if let Some(raw_priority) = priority {
            changes = changes.with_priority(Priority::new(raw_priority)?);
        }
        if let Some(new_description) = description {
            changes = changes.with_description(new_description);
        }

        let task = self.write_owned(user_id, id, &changes).await?;
        info!("task patched");
        Ok(task)
    }

    /// Deletes an owned task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist or
    /// belongs to another user.
    #[instrument(
        name = "taskmanager.task.delete_by_owner",
        skip(self),
        fields(user_id = %user_id, task_id = %id)
    )]
    pub async fn delete_task_by_owner(&self, user_id: UserId, id: TaskId) -> TaskServiceResult<()> {
        self.owned_task(user_id, id).await?;
        let deleted = self
            .tasks
            .delete_owned(user_id, id)
            .await
            .inspect_err(log_store_failure)?;
        if !deleted {
            return Err(TaskServiceError::NotFound(id));
        }
        info!("task deleted");
        Ok(())
    }

    /// Loads the task and collapses "missing" and "owned by someone else"
    /// into the same [`TaskServiceError::NotFound`].
    async fn owned_task(&self, user_id: UserId, id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await
            .inspect_err(log_store_failure)?
            .filter(|task| task.is_owned_by(user_id))
            .ok_or(TaskServiceError::NotFound(id))
    }

    async fn write_owned(
        &self,
        user_id: UserId,
        id: TaskId,
        changes: &TaskChangeset,
    ) -> TaskServiceResult<Task> {
        self.tasks
            .update_owned(user_id, id, changes)
            .await
            .inspect_err(log_store_failure)?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Current time at the microsecond precision `PostgreSQL` stores.
    fn now(&self) -> DateTime<Utc> {
        self.clock.utc().trunc_subsecs(6)
    }
}

fn log_store_failure(err: &TaskRepositoryError) {
    warn!(error = %err, "task store call failed");
}
