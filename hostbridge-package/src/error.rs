//! Error types for the package crate.

use thiserror::Error;

/// Result type for package operations.
pub type PackageResult<T> = Result<T, PackageError>;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("file not found in package: {0}")]
    NotFound(String),

    #[error("path escapes package root: {0}")]
    InvalidPath(String),

    #[error("manifest validation error: {0}")]
    ManifestInvalid(String),
}
