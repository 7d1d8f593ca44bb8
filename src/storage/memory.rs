//! Shared table set backing the in-memory adapters.
//!
//! All three in-memory repositories operate on one [`MemoryDatabase`], so
//! relational rules that span tables (task ownership, cascade on user
//! deletion, email uniqueness) hold exactly as they do in `PostgreSQL`. Each
//! repository call takes the lock for the duration of that call only, which
//! makes every check-then-act sequence atomic.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

use crate::binding::domain::Binding;
use crate::task::domain::{Task, TaskId};
use crate::user::domain::{User, UserId};

/// Error raised when a previous writer panicked while holding the lock.
#[derive(Debug, Clone, Error)]
#[error("in-memory store lock poisoned: {0}")]
pub struct PoisonedStore(String);

/// Thread-safe in-memory database shared by the in-memory adapters.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: BTreeMap<UserId, User>,
    pub(crate) tasks: BTreeMap<TaskId, Task>,
    pub(crate) bindings: HashMap<String, Binding>,
    last_user_id: i64,
    last_task_id: i64,
}

impl Tables {
    /// Allocates the next user identifier, starting at 1.
    pub(crate) const fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId::new(self.last_user_id)
    }

    /// Allocates the next task identifier, starting at 1.
    pub(crate) const fn next_task_id(&mut self) -> TaskId {
        self.last_task_id += 1;
        TaskId::new(self.last_task_id)
    }

    /// Returns `true` when another user already holds `email`.
    pub(crate) fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.email() == email && Some(user.id()) != except)
    }
}

impl MemoryDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, PoisonedStore> {
        self.tables
            .read()
            .map_err(|err| PoisonedStore(err.to_string()))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, PoisonedStore> {
        self.tables
            .write()
            .map_err(|err| PoisonedStore(err.to_string()))
    }
}
