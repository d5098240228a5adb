//! Package store backed by a plain directory on disk.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::store::{Package, PackageFile, normalize_path};
use crate::{PackageError, PackageResult};

/// Serves files from a directory, e.g. an unpacked resource during development.
#[derive(Debug, Clone)]
pub struct DirectoryPackage {
    root: PathBuf,
}

impl DirectoryPackage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PackageResult<PathBuf> {
        Ok(self.root.join(normalize_path(path)?))
    }
}

impl Package for DirectoryPackage {
    fn file_exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn open_file(&self, path: &str) -> PackageResult<PackageFile> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(PackageError::NotFound(path.to_string()));
        }
        let file = File::open(&full)?;
        let size = file.metadata()?.len();
        debug!(path = %full.display(), size, "Opened package file");
        Ok(PackageFile::new(path, size, Box::new(file)))
    }
}
