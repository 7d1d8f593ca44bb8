//! In-memory user repository.

use async_trait::async_trait;

use crate::storage::memory::MemoryDatabase;
use crate::user::{
    domain::{NewUser, PersistedUserData, User, UserChangeset, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    database: MemoryDatabase,
}

impl InMemoryUserRepository {
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
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let mut tables = self.database.write()?;
        if tables.email_taken(&user.email, None) {
            return Err(UserRepositoryError::DuplicateEmail(user.email.clone()));
        }

        let id = tables.next_user_id();
        let stored = User::from_persisted(PersistedUserData {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.created_at,
        });
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let tables = self.database.read()?;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserRepositoryResult<Option<User>> {
        let tables = self.database.read()?;
        Ok(tables
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        let tables = self.database.read()?;
        Ok(tables.users.values().cloned().collect())
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChangeset,
    ) -> UserRepositoryResult<Option<User>> {
        let mut tables = self.database.write()?;
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = changes.email()
            && tables.email_taken(email, Some(id))
        {
            return Err(UserRepositoryError::DuplicateEmail(email.to_owned()));
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        user.apply(changes);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<bool> {
        let mut tables = self.database.write()?;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.tasks.retain(|_, task| task.user_id() != id);
        Ok(true)
    }
}
