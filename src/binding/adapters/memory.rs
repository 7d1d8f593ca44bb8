//! In-memory binding repository.

use async_trait::async_trait;

use crate::binding::{
    domain::{Binding, ChatId},
    ports::{BindingRepository, BindingRepositoryResult},
};
use crate::storage::memory::MemoryDatabase;

/// Thread-safe in-memory binding repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBindingRepository {
    database: MemoryDatabase,
}

impl InMemoryBindingRepository {
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
impl BindingRepository for InMemoryBindingRepository {
    async fn upsert(&self, binding: &Binding) -> BindingRepositoryResult<Binding> {
        let mut tables = self.database.write()?;
        tables
            .bindings
            .insert(binding.email().to_owned(), binding.clone());
        Ok(binding.clone())
    }

    async fn find_chat_id(&self, email: &str) -> BindingRepositoryResult<Option<ChatId>> {
        let tables = self.database.read()?;
        Ok(tables.bindings.get(email).map(Binding::chat_id))
    }
}
