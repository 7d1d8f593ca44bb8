//! `PostgreSQL` connection management and schema for task manager adapters.

mod pool;
pub mod schema;

pub use pool::{PgPool, SCHEMA_SQL, StorageFailure, apply_schema, build_pool};
pub(crate) use pool::run_blocking;
