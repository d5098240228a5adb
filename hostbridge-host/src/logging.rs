//! Tracing subscriber setup for embedders.

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::BridgeError;

/// Installs a global fmt subscriber filtered by `config.filter`.
///
/// `RUST_LOG`, when set, takes precedence over the configured filter. Fails
/// if a global subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<(), BridgeError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| BridgeError::Logging(e.to_string()))
}
