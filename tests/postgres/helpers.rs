//! Per-test database provisioning for `PostgreSQL` integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use eyre::WrapErr;
use taskmanager::config::DatabaseConfig;
use taskmanager::storage::postgres::{PgPool, apply_schema, build_pool};
use url::Url;

/// Environment variable naming the server used by this suite.
pub const TEST_DATABASE_URL_VAR: &str = "TASKMANAGER_TEST_DATABASE_URL";

static NEXT_DATABASE: AtomicUsize = AtomicUsize::new(0);

/// A freshly created database that is dropped again with the value.
pub struct TestDatabase {
    admin_url: String,
    name: String,
    /// Pool connected to the test database.
    pub pool: PgPool,
}

impl TestDatabase {
    /// Creates a uniquely named database, applies the schema and returns a
    /// pool for it.
    ///
    /// Returns `Ok(None)` when [`TEST_DATABASE_URL_VAR`] is unset.
    ///
    /// # Errors
    ///
    /// Returns an error when the server is unreachable or the schema fails.
    pub fn provision() -> eyre::Result<Option<Self>> {
        let Ok(admin_url) = std::env::var(TEST_DATABASE_URL_VAR) else {
            return Ok(None);
        };
        let name = format!(
            "taskmanager_test_{}_{}",
            std::process::id(),
            NEXT_DATABASE.fetch_add(1, Ordering::Relaxed)
        );

        let mut admin = PgConnection::establish(&admin_url)
            .wrap_err("connect to the test server")?;
        admin
            .batch_execute(&format!("CREATE DATABASE \"{name}\""))
            .wrap_err("create test database")?;

        let mut url = Url::parse(&admin_url).wrap_err("parse test server URL")?;
        url.set_path(&format!("/{name}"));
        let config = DatabaseConfig {
            url: url.into(),
            max_connections: 4,
            ..DatabaseConfig::default()
        };
        let pool = build_pool(&config).wrap_err("build test pool")?;
        let mut connection = pool.get().wrap_err("check out test connection")?;
        apply_schema(&mut connection).wrap_err("apply schema")?;

        Ok(Some(Self {
            admin_url,
            name,
            pool,
        }))
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let dropped = PgConnection::establish(&self.admin_url)
            .map_err(|err| err.to_string())
            .and_then(|mut admin| {
                admin
                    .batch_execute(&format!(
                        "DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)",
                        self.name
                    ))
                    .map_err(|err| err.to_string())
            });
        if let Err(err) = dropped {
            tracing::warn!(database = %self.name, error = %err, "failed to drop test database");
        }
    }
}

/// Provisions a database or skips the calling test.
macro_rules! database_or_skip {
    () => {
        match $crate::postgres::helpers::TestDatabase::provision()? {
            Some(database) => database,
            None => {
                tracing::warn!("TASKMANAGER_TEST_DATABASE_URL unset, skipping");
                return Ok(());
            }
        }
    };
}

pub(crate) use database_or_skip;
