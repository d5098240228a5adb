//! Resource manifest (resource.toml) within a package.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reader::ResourceFileReader;
use crate::{PackageError, PackageResult};

pub(crate) const MANIFEST_ENTRY: &str = "resource.toml";

/// Describes the hosted unit a package contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResourceManifest {
    /// Resource name as the host knows it.
    pub name: String,
    /// Runtime that hosts this unit (e.g. "csharp", "js").
    #[serde(rename = "type")]
    pub runtime: String,
    /// Package path of the unit's entry artifact.
    pub main: String,
    /// Other resources that must be running before this one starts.
    #[serde(default)]
    pub deps: Vec<String>,
}

impl ResourceManifest {
    pub fn from_toml_str(s: &str) -> PackageResult<Self> {
        let manifest: Self = toml::from_str(s)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Loads the manifest through `reader`. A package without one yields `None`.
    pub fn load(reader: &ResourceFileReader<'_>) -> PackageResult<Option<Self>> {
        if !reader.exists(MANIFEST_ENTRY) {
            debug!("Package has no {MANIFEST_ENTRY}");
            return Ok(None);
        }
        let bytes = reader.read(MANIFEST_ENTRY)?;
        let text = std::str::from_utf8(&bytes)
            .map_err(|e| PackageError::ManifestInvalid(e.to_string()))?;
        Self::from_toml_str(text).map(Some)
    }

    fn validate(&self) -> PackageResult<()> {
        if self.name.trim().is_empty() {
            return Err(PackageError::ManifestInvalid("name is empty".into()));
        }
        if self.main.trim().is_empty() {
            return Err(PackageError::ManifestInvalid("main is empty".into()));
        }
        Ok(())
    }
}
