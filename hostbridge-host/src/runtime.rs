//! Collaborators the bridge drives: the native host resource and the hosted
//! runtime.
//!
//! Neither side's internals live here. The host supplies its resource name,
//! package and natives switch; the runtime is told when to come up and when
//! to start or stop the unit. Runtime failures are reported as
//! `anyhow::Error` and converted into `BridgeError::Runtime` by the bridge.

use hostbridge_package::{Package, PackageResult, ResourceFileReader, ResourceManifest};

use crate::delegates::DelegateTable;

/// The native host's view of the resource this bridge serves.
pub trait HostResource {
    /// Resource name as the host knows it.
    fn name(&self) -> &str;

    /// Package store holding the unit's artifacts.
    fn package(&self) -> &dyn Package;

    /// Allows the unit to call native functions from now on.
    fn enable_natives(&self);
}

/// The externally hosted runtime that executes the unit.
///
/// Methods take `&self` because a unit may call back into the bridge while
/// one of them is still running; implementations keep their own state
/// behind interior mutability.
pub trait HostedRuntime {
    /// Brings the runtime up. Called on every start; must tolerate being
    /// called when the runtime is already initialized.
    fn initialize(&self) -> anyhow::Result<()>;

    /// Starts the unit. Delegates are bound through `unit.delegates()`.
    fn start_unit(&self, unit: &UnitContext<'_>) -> anyhow::Result<()>;

    fn stop_unit(&self, unit: &UnitContext<'_>) -> anyhow::Result<()>;
}

/// Everything a runtime is handed for one start or stop call.
pub struct UnitContext<'a> {
    name: &'a str,
    entry: Option<&'a str>,
    manifest: Option<&'a ResourceManifest>,
    delegates: &'a DelegateTable,
    files: ResourceFileReader<'a>,
}

impl<'a> UnitContext<'a> {
    pub(crate) fn new(
        name: &'a str,
        entry: Option<&'a str>,
        manifest: Option<&'a ResourceManifest>,
        delegates: &'a DelegateTable,
        package: &'a dyn Package,
    ) -> Self {
        Self {
            name,
            entry,
            manifest,
            delegates,
            files: ResourceFileReader::new(package),
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Package path of the unit's entry artifact, if one is configured.
    pub fn entry(&self) -> Option<&'a str> {
        self.entry
    }

    pub fn manifest(&self) -> Option<&'a ResourceManifest> {
        self.manifest
    }

    pub fn delegates(&self) -> &'a DelegateTable {
        self.delegates
    }

    /// Reads a packaged file. Missing files read as empty.
    pub fn read_file(&self, path: &str) -> PackageResult<Vec<u8>> {
        self.files.read(path)
    }

    /// Reads the entry artifact. No entry, or a missing one, reads as empty.
    pub fn read_entry(&self) -> PackageResult<Vec<u8>> {
        match self.entry {
            Some(entry) => self.files.read(entry),
            None => Ok(Vec::new()),
        }
    }
}
