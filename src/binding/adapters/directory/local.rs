//! User directory answered by the in-process user service.

use async_trait::async_trait;
use mockable::Clock;

use crate::binding::ports::{UserDirectory, UserDirectoryError, UserDirectoryResult};
use crate::user::{
    ports::UserRepository,
    services::{UserService, UserServiceError},
};

/// Checks email existence against the local user store.
#[derive(Clone)]
pub struct LocalUserDirectory<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    users: UserService<R, C>,
}

impl<R, C> LocalUserDirectory<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a directory backed by `users`.
    #[must_use]
    pub const fn new(users: UserService<R, C>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R, C> UserDirectory for LocalUserDirectory<R, C>
where
    R: UserRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    async fn exists(&self, email: &str) -> UserDirectoryResult<bool> {
        match self.users.find_by_email(email).await {
            Ok(_) => Ok(true),
            Err(UserServiceError::EmailNotFound(_)) => Ok(false),
            Err(err) => Err(UserDirectoryError::Backend(Box::new(err))),
        }
    }
}
