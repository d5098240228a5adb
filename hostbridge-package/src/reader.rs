//! Whole-file reads from a package store.

use tracing::{debug, warn};

use crate::PackageResult;
use crate::store::Package;

/// Loads complete files out of a [`Package`].
///
/// A path the store does not contain reads as an empty byte sequence. Callers
/// that need to tell an empty file from a missing one must ask
/// [`ResourceFileReader::exists`] first.
#[derive(Clone, Copy)]
pub struct ResourceFileReader<'p> {
    package: &'p dyn Package,
}

impl<'p> ResourceFileReader<'p> {
    pub fn new(package: &'p dyn Package) -> Self {
        Self { package }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.package.file_exists(path)
    }

    /// Reads the full file in one pass after querying its size.
    pub fn read(&self, path: &str) -> PackageResult<Vec<u8>> {
        if !self.package.file_exists(path) {
            debug!(path, "Package file absent, returning empty");
            return Ok(Vec::new());
        }

        let mut file = self.package.open_file(path)?;
        let size = self.package.file_size(&file) as usize;
        let mut buf = vec![0u8; size];
        let mut filled = 0;
        let result = loop {
            if filled == size {
                break Ok(());
            }
            match self.package.read_file(&mut file, &mut buf[filled..]) {
                Ok(0) => break Ok(()),
                Ok(n) => filled += n,
                Err(e) => break Err(e),
            }
        };
        self.package.close_file(file);
        result?;

        if filled < size {
            warn!(path, expected = size, read = filled, "Package file shorter than reported size");
            buf.truncate(filled);
        }
        Ok(buf)
    }

    /// Reads a file and decodes it as UTF-8, replacing invalid sequences.
    pub fn read_to_string(&self, path: &str) -> PackageResult<String> {
        let bytes = self.read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
