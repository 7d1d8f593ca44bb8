//! Service layer for user creation, replacement, patching and removal.

use crate::error::ErrorKind;
use crate::user::{
    domain::{NewUser, User, UserChangeset, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::validation::{ValidationError, require_email, require_name};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    name: String,
    email: String,
}

impl CreateUserRequest {
    /// Creates a request with both mandatory fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Request payload for replacing every mutable field of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceUserRequest {
    name: String,
    email: String,
}

impl ReplaceUserRequest {
    /// Creates a full-replacement request.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Request payload for changing only the supplied user fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchUserRequest {
    name: Option<String>,
    email: Option<String>,
}

impl PatchUserRequest {
    /// Creates a patch that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns `true` when no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// Service-level errors for user operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Supplied data violates a domain rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No user has the identifier.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// No user holds the email address.
    #[error("user not found for email: {0}")]
    EmailNotFound(String),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

impl UserServiceError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::EmailNotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) => ErrorKind::Store,
        }
    }
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User orchestration service; the sole authority on legal user mutations.
pub struct UserService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for UserService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> UserService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a user after checking that name and email are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Validation`] for an empty name or email
    /// and [`UserServiceError::Repository`] when persistence fails.
    #[instrument(name = "taskmanager.user.create", skip_all)]
    pub async fn create_user(&self, request: CreateUserRequest) -> UserServiceResult<User> {
        let CreateUserRequest { name, email } = request;
        require_name(&name)?;
        require_email(&email)?;

        let new_user = NewUser {
            name,
            email,
            created_at: self.now(),
        };
        let user = self
            .repository
            .insert(&new_user)
            .await
            .inspect_err(log_store_failure)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the user does not exist.
    #[instrument(name = "taskmanager.user.get", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: UserId) -> UserServiceResult<User> {
        debug!("loading user");
        self.repository
            .find_by_id(id)
            .await
            .inspect_err(log_store_failure)?
            .ok_or(UserServiceError::NotFound(id))
    }

    /// Retrieves a user by exact email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::EmailNotFound`] when nobody holds the
    /// address.
    #[instrument(name = "taskmanager.user.find_by_email", skip_all)]
    pub async fn find_by_email(&self, email: &str) -> UserServiceResult<User> {
        debug!("looking up user by email");
        self.repository
            .find_by_email(email)
            .await
            .inspect_err(log_store_failure)?
            .ok_or_else(|| UserServiceError::EmailNotFound(email.to_owned()))
    }

    /// Returns a snapshot of every user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when persistence fails.
    #[instrument(name = "taskmanager.user.list", skip(self))]
    pub async fn list_users(&self) -> UserServiceResult<Vec<User>> {
        let users = self
            .repository
            .list()
            .await
            .inspect_err(log_store_failure)?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    /// Replaces name and email; both are mandatory.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Validation`] for an empty field and
    /// [`UserServiceError::NotFound`] when the user does not exist.
    #[instrument(name = "taskmanager.user.replace", skip(self, request), fields(user_id = %id))]
    pub async fn replace_user(
        &self,
        id: UserId,
        request: ReplaceUserRequest,
    ) -> UserServiceResult<User> {
        let ReplaceUserRequest { name, email } = request;
        require_name(&name)?;
        require_email(&email)?;

        let changes = UserChangeset::new(self.now())
            .with_name(name)
            .with_email(email);
        let user = self.write(id, &changes).await?;
        info!("user replaced");
        Ok(user)
    }

    /// Changes only the supplied fields.
    ///
    /// A patch without fields is a no-op that still reports a missing user
    /// and leaves `updated_at` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the user does not exist
    /// and [`UserServiceError::Validation`] when a supplied field is empty.
    #[instrument(name = "taskmanager.user.patch", skip(self, request), fields(user_id = %id))]
    pub async fn patch_user(&self, id: UserId, request: PatchUserRequest) -> UserServiceResult<User> {
        if request.is_empty() {
            debug!("empty patch, returning current user");
            return self.get_user(id).await;
        }

        let mut changes = UserChangeset::new(self.now());
        if let Some(new_name) = request.name {
            require_name(&new_name)?;
            changes = changes.with_name(new_name);
        }
        if let Some(new_email) = request.email {
            require_email(&new_email)?;
            changes = changes.with_email(new_email);
        }

        let user = self.write(id, &changes).await?;
        info!("user patched");
        Ok(user)
    }

    /// Deletes a user and, by cascade, every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the user does not exist.
    #[instrument(name = "taskmanager.user.delete", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: UserId) -> UserServiceResult<()> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .inspect_err(log_store_failure)?;
        if !deleted {
            return Err(UserServiceError::NotFound(id));
        }
        info!("user deleted");
        Ok(())
    }

    async fn write(&self, id: UserId, changes: &UserChangeset) -> UserServiceResult<User> {
        self.repository
            .update(id, changes)
            .await
            .inspect_err(log_store_failure)?
            .ok_or(UserServiceError::NotFound(id))
    }

    /// Current time at the microsecond precision `PostgreSQL` stores.
    fn now(&self) -> DateTime<Utc> {
        self.clock.utc().trunc_subsecs(6)
    }
}

fn log_store_failure(err: &UserRepositoryError) {
    warn!(error = %err, "user store call failed");
}
