//! User-existence capability consumed by the binding workflow.

use async_trait::async_trait;
use thiserror::Error;

/// Result type for user directory lookups.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Answers one question: does a user with this email exist?
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns `true` when a user holds exactly `email`.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError`] when the lookup itself fails, as
    /// opposed to giving a definite answer.
    async fn exists(&self, email: &str) -> UserDirectoryResult<bool>;
}

/// Errors raised when the existence check cannot be answered.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// The configured registry URL cannot address the users endpoint.
    #[error("invalid user directory base url: {0}")]
    InvalidBaseUrl(String),

    /// The request never produced a response.
    #[error("user directory transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The registry answered with a status that is neither found nor
    /// not-found.
    #[error("user directory returned unexpected status {0}")]
    UnexpectedStatus(u16),

    /// The in-process user store failed.
    #[error("user directory backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Returns `true` for failures a repeated read may not hit again.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::UnexpectedStatus(status) => *status >= 500,
            Self::InvalidBaseUrl(_) | Self::Backend(_) => false,
        }
    }
}
