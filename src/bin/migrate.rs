//! Creates the task manager tables in the configured `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! TASKMANAGER_DATABASE__URL=postgres://app:secret@db/tasks taskmanager-migrate
//! ```
//!
//! Configuration is resolved exactly as the library does it (defaults, the
//! optional YAML file, `DATABASE_URL`, then `TASKMANAGER_*` variables). The
//! schema uses `CREATE ... IF NOT EXISTS`, so running the binary twice is
//! harmless.

use diesel::r2d2::PoolError;
use taskmanager::config::{AppConfig, ConfigError};
use taskmanager::storage::postgres::{apply_schema, build_pool};
use taskmanager::telemetry::{self, TelemetryError};
use thiserror::Error;
use tracing::info;

/// Errors that stop the migration.
#[derive(Debug, Error)]
enum MigrateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to connect: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to apply schema: {0}")]
    Schema(#[from] diesel::result::Error),
}

fn main() -> Result<(), MigrateError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.logging)?;
    info!(database = %config.database.masked_url(), "applying schema");

    let pool = build_pool(&config.database)?;
    let mut connection = pool.get()?;
    apply_schema(&mut connection)?;

    info!("schema up to date");
    Ok(())
}
