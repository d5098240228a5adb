//! Resource packages for hostbridge units.
//!
//! A package is the read-only store a hosted unit's artifacts live in:
//! - `resource.toml`: optional manifest naming the unit and its entry file
//! - the entry artifact itself (assembly, script bundle, ...)
//! - any further files the unit loads at runtime
//!
//! Two stores are provided: [`DirectoryPackage`] for unpacked resources and
//! [`ZipPackage`] for archives. [`ResourceFileReader`] reads whole files out
//! of either and treats a missing path as empty rather than as an error.

mod directory;
mod error;
mod manifest;
mod package;
mod reader;
mod store;

pub use directory::DirectoryPackage;
pub use error::{PackageError, PackageResult};
pub use manifest::ResourceManifest;
pub use package::{PackageBuilder, ZipPackage};
pub use reader::ResourceFileReader;
pub use store::{Package, PackageFile};

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manifest() -> ResourceManifest {
        ResourceManifest {
            name: "example".into(),
            runtime: "csharp".into(),
            main: "client/Example.dll".into(),
            deps: vec![],
        }
    }

    #[test]
    fn roundtrip_pack_read() {
        let dll = b"MZ\x90\x00fake assembly".to_vec();
        let bytes = PackageBuilder::new()
            .manifest(test_manifest())
            .file("client/Example.dll", dll.clone())
            .build()
            .expect("pack should succeed");

        let pkg = ZipPackage::from_bytes(bytes).expect("open should succeed");
        let reader = ResourceFileReader::new(&pkg);

        let manifest = ResourceManifest::load(&reader).unwrap().unwrap();
        assert_eq!(manifest, test_manifest());
        assert_eq!(reader.read(&manifest.main).unwrap(), dll);
    }

    #[test]
    fn package_without_manifest_loads_none() {
        let bytes = PackageBuilder::new().file("a.js", "1").build().unwrap();
        let pkg = ZipPackage::from_bytes(bytes).unwrap();
        let reader = ResourceFileReader::new(&pkg);
        assert!(ResourceManifest::load(&reader).unwrap().is_none());
    }
}
