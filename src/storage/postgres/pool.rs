//! Pool construction and the blocking-call bridge for Diesel adapters.

use crate::config::DatabaseConfig;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError};
use std::time::Duration;
use thiserror::Error;

/// `PostgreSQL` connection pool type used by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL creating the `users`, `tasks` and `chat_bindings` tables.
pub const SCHEMA_SQL: &str =
    include_str!("../../../migrations/2026-10-16-000000_create_tables/up.sql");

/// Failure raised before an adapter query could run.
#[derive(Debug, Error)]
pub enum StorageFailure {
    /// No pooled connection became available in time.
    #[error("failed to check out a database connection: {0}")]
    Pool(#[from] PoolError),

    /// The blocking worker panicked or was cancelled.
    #[error("database worker did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Applies `statement_timeout` to each connection on checkout so that no
/// single query can outlive the configured bound.
#[derive(Debug, Clone, Copy)]
struct StatementTimeout(Duration);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!(
                "SET statement_timeout = {}",
                self.0.as_millis()
            ))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds a connection pool from database configuration.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot open its initial connections.
pub fn build_pool(config: &DatabaseConfig) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());
    Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(config.connect_timeout)
        .connection_customizer(Box::new(StatementTimeout(config.statement_timeout)))
        .build(manager)
}

/// Creates the task manager tables when they do not already exist.
///
/// # Errors
///
/// Returns the Diesel error raised by the DDL batch.
pub fn apply_schema(connection: &mut PgConnection) -> diesel::QueryResult<()> {
    connection.batch_execute(SCHEMA_SQL)
}

/// Runs `f` on a pooled connection inside `spawn_blocking`.
///
/// Dropping the returned future abandons the request; the statement timeout
/// bounds any query that is already executing.
pub(crate) async fn run_blocking<F, T, E>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<StorageFailure> + Send + 'static,
{
    let shared_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared_pool
            .get()
            .map_err(|err| E::from(StorageFailure::Pool(err)))?;
        f(&mut connection)
    })
    .await
    .map_err(|err| E::from(StorageFailure::Join(err)))?
}
