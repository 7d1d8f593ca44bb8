//! Repository port for chat binding persistence.

use crate::binding::domain::{Binding, ChatId};
use crate::storage::{memory::PoisonedStore, postgres::StorageFailure};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for binding repository operations.
pub type BindingRepositoryResult<T> = Result<T, BindingRepositoryError>;

/// Key-value store from email to chat channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BindingRepository: Send + Sync {
    /// Inserts the binding or replaces the chat channel already bound to
    /// its email. Last write wins.
    async fn upsert(&self, binding: &Binding) -> BindingRepositoryResult<Binding>;

    /// Returns the chat channel bound to exactly `email`, if any.
    async fn find_chat_id(&self, email: &str) -> BindingRepositoryResult<Option<ChatId>>;
}

/// Errors returned by binding repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BindingRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BindingRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<StorageFailure> for BindingRepositoryError {
    fn from(err: StorageFailure) -> Self {
        Self::persistence(err)
    }
}

impl From<PoisonedStore> for BindingRepositoryError {
    fn from(err: PoisonedStore) -> Self {
        Self::persistence(err)
    }
}
