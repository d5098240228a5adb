//! Zip-backed package store and the builder that produces its archives.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::manifest::{MANIFEST_ENTRY, ResourceManifest};
use crate::store::{Package, PackageFile, normalize_path};
use crate::{PackageError, PackageResult};

/// A packaged resource stored as a zip archive.
///
/// Entries are inflated into memory when opened; the archive itself is only
/// borrowed for the duration of each open.
pub struct ZipPackage<R: Read + Seek = Cursor<Vec<u8>>> {
    archive: RefCell<ZipArchive<R>>,
}

impl ZipPackage<Cursor<Vec<u8>>> {
    /// Opens an archive held entirely in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> PackageResult<Self> {
        Self::open(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> ZipPackage<R> {
    pub fn open(reader: R) -> PackageResult<Self> {
        let archive = ZipArchive::new(reader)?;
        debug!(entries = archive.len(), "Opened zip package");
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Names of every file entry, directories excluded.
    pub fn file_names(&self) -> Vec<String> {
        self.archive
            .borrow()
            .file_names()
            .filter(|n| !n.ends_with('/'))
            .map(str::to_string)
            .collect()
    }
}

impl<R: Read + Seek> Package for ZipPackage<R> {
    fn file_exists(&self, path: &str) -> bool {
        let Ok(name) = normalize_path(path) else {
            return false;
        };
        self.archive.borrow().file_names().any(|n| n == name)
    }

    fn open_file(&self, path: &str) -> PackageResult<PackageFile> {
        let name = normalize_path(path)?;
        let mut archive = self.archive.borrow_mut();
        let mut entry = match archive.by_name(&name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(PackageError::NotFound(path.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        if entry.is_dir() {
            return Err(PackageError::NotFound(path.to_string()));
        }
        let mut data = Vec::with_capacity(initial_capacity(entry.size()));
        entry.read_to_end(&mut data)?;
        let size = data.len() as u64;
        Ok(PackageFile::new(path, size, Box::new(Cursor::new(data))))
    }
}

/// Upper bound on what an entry's declared size may reserve up front.
const MAX_PREALLOC: u64 = 1 << 20;

/// Capacity to reserve for an entry. The declared size comes from the archive
/// header and is only a hint.
fn initial_capacity(declared: u64) -> usize {
    declared.min(MAX_PREALLOC) as usize
}

/// Fluent builder for zip packages.
#[derive(Default)]
pub struct PackageBuilder {
    manifest: Option<ResourceManifest>,
    files: BTreeMap<String, Vec<u8>>,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manifest(mut self, manifest: ResourceManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    pub fn file(mut self, path: &str, data: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.to_string(), data.into());
        self
    }

    /// Builds the zip archive and returns the raw bytes.
    pub fn build(self) -> PackageResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        if let Some(ref manifest) = self.manifest {
            let manifest_toml = toml::to_string_pretty(manifest)?;
            zip.start_file(MANIFEST_ENTRY, options)?;
            zip.write_all(manifest_toml.as_bytes())?;
        }

        for (path, data) in &self.files {
            let name = normalize_path(path)?;
            zip.start_file(name, options)?;
            zip.write_all(data)?;
        }

        Ok(zip.finish()?.into_inner())
    }
}
