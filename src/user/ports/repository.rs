//! Repository port for user persistence and lookup.

use crate::storage::{memory::PoisonedStore, postgres::StorageFailure};
use crate::user::domain::{NewUser, User, UserChangeset, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] when another user
    /// already holds the email address.
    async fn insert(&self, user: &NewUser) -> UserRepositoryResult<User>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by exact email address.
    ///
    /// Returns `None` when no user holds the address.
    async fn find_by_email(&self, email: &str) -> UserRepositoryResult<Option<User>>;

    /// Returns a snapshot of all users.
    async fn list(&self) -> UserRepositoryResult<Vec<User>>;

    /// Applies `changes` to the user in one atomic write.
    ///
    /// Returns `None` when no user has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] when the new email is
    /// held by another user.
    async fn update(
        &self,
        id: UserId,
        changes: &UserChangeset,
    ) -> UserRepositoryResult<Option<User>>;

    /// Deletes the user together with every task it owns.
    ///
    /// Returns `false` when no user has the identifier.
    async fn delete(&self, id: UserId) -> UserRepositoryResult<bool>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// Another user already holds the email address.
    #[error("duplicate user email: {0}")]
    DuplicateEmail(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<StorageFailure> for UserRepositoryError {
    fn from(err: StorageFailure) -> Self {
        Self::persistence(err)
    }
}

impl From<PoisonedStore> for UserRepositoryError {
    fn from(err: PoisonedStore) -> Self {
        Self::persistence(err)
    }
}
