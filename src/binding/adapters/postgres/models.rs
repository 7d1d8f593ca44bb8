//! Diesel row models for chat bindings.

use crate::binding::domain::{Binding, ChatId};
use crate::storage::postgres::schema::chat_bindings;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for chat bindings.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = chat_bindings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BindingRow {
    /// Bound email address.
    pub email: String,
    /// External chat identifier.
    pub chat_id: i64,
    /// Last upsert timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Binding> for BindingRow {
    fn from(binding: &Binding) -> Self {
        Self {
            email: binding.email().to_owned(),
            chat_id: binding.chat_id().into_inner(),
            updated_at: binding.updated_at(),
        }
    }
}

impl From<BindingRow> for Binding {
    fn from(row: BindingRow) -> Self {
        Self::new(row.email, ChatId::new(row.chat_id), row.updated_at)
    }
}
