//! Error types for the bridge.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("unit already running: {0}")]
    AlreadyRunning(String),

    #[error("unit not running: {0}")]
    NotRunning(String),

    #[error("hosted runtime failed: {unit}: {message}")]
    Runtime { unit: String, message: String },

    #[error("package error: {0}")]
    Package(#[from] hostbridge_package::PackageError),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("logging already initialized: {0}")]
    Logging(String),
}

impl BridgeError {
    pub(crate) fn runtime(unit: &str, err: anyhow::Error) -> Self {
        Self::Runtime {
            unit: unit.to_string(),
            message: format!("{err:#}"),
        }
    }
}
