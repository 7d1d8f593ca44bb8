//! In-memory task repository.

use async_trait::async_trait;
use std::cmp::Reverse;

use crate::storage::memory::MemoryDatabase;
use crate::task::{
    domain::{NewTask, Task, TaskChangeset, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    database: MemoryDatabase,
}

impl InMemoryTaskRepository {
    /// Creates a repository over its own empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository sharing `database` with other adapters.
    #[must_use]
    pub const fn with_database(database: MemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut tables = self.database.write()?;
        if !tables.users.contains_key(&task.user_id) {
            return Err(TaskRepositoryError::OwnerNotFound(task.user_id));
        }

        let id = tables.next_task_id();
        let stored = task.clone().into_task(id);
        tables.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tables = self.database.read()?;
        Ok(tables.tasks.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let tables = self.database.read()?;
        let mut tasks: Vec<Task> = tables
            .tasks
            .values()
            .filter(|task| task.is_owned_by(owner))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| Reverse((task.created_at(), task.id())));
        Ok(tasks)
    }

    async fn update_owned(
        &self,
        owner: UserId,
        id: TaskId,
        changes: &TaskChangeset,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut tables = self.database.write()?;
        let Some(task) = tables
            .tasks
            .get_mut(&id)
            .filter(|task| task.is_owned_by(owner))
        else {
            return Ok(None);
        };
        task.apply(changes);
        Ok(Some(task.clone()))
    }

    async fn delete_owned(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut tables = self.database.write()?;
        let owned = tables
            .tasks
            .get(&id)
            .is_some_and(|task| task.is_owned_by(owner));
        if owned {
            tables.tasks.remove(&id);
        }
        Ok(owned)
    }
}
