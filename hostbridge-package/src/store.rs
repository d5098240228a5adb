//! The file-access surface every package store exposes.
//!
//! Mirrors the host's package API one call at a time: check existence, open,
//! query size, read, close. There is no write path.

use std::fmt;
use std::io::Read;
use std::path::{Component, Path};

use crate::{PackageError, PackageResult};

/// An open file inside a package.
///
/// Owns its reader until it is handed back through [`Package::close_file`]
/// or dropped.
pub struct PackageFile {
    path: String,
    size: u64,
    reader: Box<dyn Read>,
}

impl PackageFile {
    pub fn new(path: impl Into<String>, size: u64, reader: Box<dyn Read>) -> Self {
        Self {
            path: path.into(),
            size,
            reader,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub(crate) fn reader_mut(&mut self) -> &mut dyn Read {
        self.reader.as_mut()
    }
}

impl fmt::Debug for PackageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageFile")
            .field("path", &self.path)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Read-only store holding a unit's packaged files.
pub trait Package {
    fn file_exists(&self, path: &str) -> bool;

    fn open_file(&self, path: &str) -> PackageResult<PackageFile>;

    fn file_size(&self, file: &PackageFile) -> u64 {
        file.size()
    }

    /// Reads up to `buf.len()` bytes, returning how many were read.
    fn read_file(&self, file: &mut PackageFile, buf: &mut [u8]) -> PackageResult<usize> {
        Ok(file.reader_mut().read(buf)?)
    }

    fn close_file(&self, file: PackageFile) {
        drop(file);
    }
}

/// Normalizes a package-relative path to forward-slash form.
///
/// Rejects absolute paths and any `..` component so a store can never be
/// asked for something outside its root.
pub(crate) fn normalize_path(path: &str) -> PackageResult<String> {
    let mut parts = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(PackageError::InvalidPath(path.to_string()));
            }
        }
    }
    if parts.is_empty() {
        return Err(PackageError::InvalidPath(path.to_string()));
    }
    Ok(parts.join("/"))
}
