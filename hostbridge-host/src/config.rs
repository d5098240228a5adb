//! Bridge configuration, read from a `hostbridge.toml` the embedder points
//! at. Falls back to defaults when the file is absent or invalid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::BridgeError;

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"hostbridge_host=debug"`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit ANSI colour codes.
    #[serde(default)]
    pub ansi: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            ansi: false,
        }
    }
}

/// Settings for the hosted unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UnitConfig {
    /// Entry artifact path; overrides the manifest's `main`.
    #[serde(default)]
    pub entry: Option<String>,
    /// Read `resource.toml` from the package on start.
    #[serde(default = "default_load_manifest")]
    pub load_manifest: bool,
}

fn default_load_manifest() -> bool {
    true
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            entry: None,
            load_manifest: default_load_manifest(),
        }
    }
}

/// Top-level bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub unit: UnitConfig,
}

impl BridgeConfig {
    /// Parses a configuration document strictly.
    pub fn from_toml_str(s: &str) -> Result<Self, BridgeError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from `path`.
    /// Falls back to defaults with a warning on read or parse errors.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No bridge config found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded bridge config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse bridge config {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read bridge config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
