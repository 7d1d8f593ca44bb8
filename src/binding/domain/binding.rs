//! Email to chat binding record.

use super::ChatId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The chat channel currently bound to an email address.
///
/// There is at most one binding per email; a later binding replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    email: String,
    chat_id: ChatId,
    updated_at: DateTime<Utc>,
}

impl Binding {
    /// Creates a binding record.
    #[must_use]
    pub fn new(email: impl Into<String>, chat_id: ChatId, updated_at: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            chat_id,
            updated_at,
        }
    }

    /// Returns the bound email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the bound chat channel.
    #[must_use]
    pub const fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    /// Returns when the binding was last written.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
