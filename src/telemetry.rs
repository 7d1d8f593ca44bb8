//! Structured logging bootstrap.

use crate::config::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an invalid level and
/// [`TelemetryError::Install`] when called more than once.
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = filter_for(std::env::var("RUST_LOG").ok().as_deref(), &config.level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(TelemetryError::Install)
}

fn filter_for(rust_log: Option<&str>, level: &str) -> Result<EnvFilter, TelemetryError> {
    let directives = rust_log.filter(|value| !value.trim().is_empty());
    Ok(EnvFilter::try_new(directives.unwrap_or(level))?)
}
