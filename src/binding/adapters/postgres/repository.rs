//! `PostgreSQL` repository implementation for chat bindings.

use super::models::BindingRow;
use crate::binding::{
    domain::{Binding, ChatId},
    ports::{BindingRepository, BindingRepositoryError, BindingRepositoryResult},
};
use crate::storage::postgres::{PgPool, run_blocking, schema::chat_bindings};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;

/// `PostgreSQL`-backed binding repository.
#[derive(Debug, Clone)]
pub struct PostgresBindingRepository {
    pool: PgPool,
}

impl PostgresBindingRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BindingRepository for PostgresBindingRepository {
    async fn upsert(&self, binding: &Binding) -> BindingRepositoryResult<Binding> {
        let row = BindingRow::from(binding);
        run_blocking(&self.pool, move |connection| {
            let stored = diesel::insert_into(chat_bindings::table)
                .values(&row)
                .on_conflict(chat_bindings::email)
                .do_update()
                .set((
                    chat_bindings::chat_id.eq(excluded(chat_bindings::chat_id)),
                    chat_bindings::updated_at.eq(excluded(chat_bindings::updated_at)),
                ))
                .returning(BindingRow::as_returning())
                .get_result::<BindingRow>(connection)
                .map_err(BindingRepositoryError::persistence)?;
            Ok(Binding::from(stored))
        })
        .await
    }

    async fn find_chat_id(&self, email: &str) -> BindingRepositoryResult<Option<ChatId>> {
        let lookup_email = email.to_owned();
        run_blocking(&self.pool, move |connection| {
            let chat_id = chat_bindings::table
                .find(&lookup_email)
                .select(chat_bindings::chat_id)
                .first::<i64>(connection)
                .optional()
                .map_err(BindingRepositoryError::persistence)?;
            Ok(chat_id.map(ChatId::new))
        })
        .await
    }
}
