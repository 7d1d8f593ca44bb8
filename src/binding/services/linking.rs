//! Service that binds a verified email to a chat channel.

use crate::binding::{
    domain::{Binding, ChatId},
    ports::{BindingRepository, BindingRepositoryError, UserDirectory, UserDirectoryError},
};
use crate::error::ErrorKind;
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Service-level errors for the binding workflow.
#[derive(Debug, Error)]
pub enum BindingServiceError {
    /// No user holds the email address.
    #[error("no user with email '{0}'")]
    UserNotFound(String),

    /// No chat channel is bound to the email address.
    #[error("no chat bound to email '{0}'")]
    ChatNotFound(String),

    /// The existence check itself failed.
    #[error(transparent)]
    Lookup(#[from] UserDirectoryError),

    /// Binding repository operation failed.
    #[error(transparent)]
    Repository(#[from] BindingRepositoryError),
}

impl BindingServiceError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_) | Self::ChatNotFound(_) => ErrorKind::NotFound,
            Self::Lookup(_) => ErrorKind::Lookup,
            Self::Repository(_) => ErrorKind::Store,
        }
    }
}

/// Result type for binding service operations.
pub type BindingServiceResult<T> = Result<T, BindingServiceError>;

/// Binds chat channels to emails of existing users.
#[derive(Clone)]
pub struct BindingService<D, B, C>
where
    D: UserDirectory,
    B: BindingRepository,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    bindings: Arc<B>,
    clock: Arc<C>,
}

impl<D, B, C> BindingService<D, B, C>
where
    D: UserDirectory,
    B: BindingRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new binding service.
    #[must_use]
    pub const fn new(directory: Arc<D>, bindings: Arc<B>, clock: Arc<C>) -> Self {
        Self {
            directory,
            bindings,
            clock,
        }
    }

    /// Binds `chat_id` to `email` once the directory confirms the user.
    ///
    /// Surrounding whitespace is trimmed from `email`; the chat message text
    /// is the candidate address. An existing binding for the email is
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns [`BindingServiceError::UserNotFound`] when no user holds the
    /// email, [`BindingServiceError::Lookup`] when the existence check fails
    /// and [`BindingServiceError::Repository`] when the write fails.
    #[instrument(name = "taskmanager.binding.bind", skip(self, email), fields(chat_id = %chat_id))]
    pub async fn bind_email_to_chat(
        &self,
        email: &str,
        chat_id: ChatId,
    ) -> BindingServiceResult<Binding> {
        let candidate = email.trim();
        if candidate.is_empty() {
            debug!("empty email candidate");
            return Err(BindingServiceError::UserNotFound(candidate.to_owned()));
        }

        let exists = self
            .directory
            .exists(candidate)
            .await
            .inspect_err(|err| warn!(error = %err, "user directory lookup failed"))?;
        if !exists {
            return Err(BindingServiceError::UserNotFound(candidate.to_owned()));
        }

        let binding = Binding::new(candidate, chat_id, self.now());
        let stored = self
            .bindings
            .upsert(&binding)
            .await
            .inspect_err(|err| warn!(error = %err, "binding store call failed"))?;
        info!("chat bound to email");
        Ok(stored)
    }

    /// Returns the chat channel bound to exactly `email`.
    ///
    /// # Errors
    ///
    /// Returns [`BindingServiceError::ChatNotFound`] when nothing is bound to
    /// the email and [`BindingServiceError::Repository`] when the read fails.
    #[instrument(name = "taskmanager.binding.resolve", skip_all)]
    pub async fn resolve_chat_for_email(&self, email: &str) -> BindingServiceResult<ChatId> {
        debug!("resolving chat for email");
        self.bindings
            .find_chat_id(email)
            .await
            .inspect_err(|err| warn!(error = %err, "binding store call failed"))?
            .ok_or_else(|| BindingServiceError::ChatNotFound(email.to_owned()))
    }

    /// Current time at the microsecond precision `PostgreSQL` stores.
    fn now(&self) -> DateTime<Utc> {
        self.clock.utc().trunc_subsecs(6)
    }
}
