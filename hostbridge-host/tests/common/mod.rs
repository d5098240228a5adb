//! Fake host and runtime shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hostbridge_host::{HostResource, HostedRuntime, UnitContext};
use hostbridge_package::{Package, PackageBuilder, ResourceManifest, ZipPackage};
use hostbridge_types::{BaseObject, BaseObjectType, EntityId, Player, Vehicle};

/// Ordered record of collaborator calls.
pub type CallLog = Rc<RefCell<Vec<String>>>;

// ================================================================
// Objects
// ================================================================

#[derive(Debug)]
pub struct FakePlayer {
    pub id: EntityId,
}

impl BaseObject for FakePlayer {
    fn object_type(&self) -> BaseObjectType {
        BaseObjectType::Player
    }

    fn as_player(&self) -> Option<&dyn Player> {
        Some(self)
    }
}

impl Player for FakePlayer {
    fn id(&self) -> EntityId {
        self.id
    }
}

#[derive(Debug)]
pub struct FakeVehicle {
    pub id: EntityId,
}

impl BaseObject for FakeVehicle {
    fn object_type(&self) -> BaseObjectType {
        BaseObjectType::Vehicle
    }

    fn as_vehicle(&self) -> Option<&dyn Vehicle> {
        Some(self)
    }
}

impl Vehicle for FakeVehicle {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// An object kind the bridge has no concrete view for.
#[derive(Debug)]
pub struct FakeOther {
    pub tag: u8,
}

impl BaseObject for FakeOther {
    fn object_type(&self) -> BaseObjectType {
        BaseObjectType::from_raw(self.tag)
    }
}

// ================================================================
// Host
// ================================================================

pub struct FakeHost {
    pub name: String,
    pub package: Box<dyn Package>,
    pub log: CallLog,
}

impl FakeHost {
    pub fn new(package: impl Package + 'static, log: CallLog) -> Self {
        Self {
            name: "freeroam".to_string(),
            package: Box::new(package),
            log,
        }
    }
}

impl HostResource for FakeHost {
    fn name(&self) -> &str {
        &self.name
    }

    fn package(&self) -> &dyn Package {
        self.package.as_ref()
    }

    fn enable_natives(&self) {
        self.log.borrow_mut().push("enable_natives".to_string());
    }
}

// ================================================================
// Runtime
// ================================================================

type UnitHook = Box<dyn Fn(&UnitContext<'_>) -> anyhow::Result<()>>;

/// Runtime whose start and stop behavior is set per test.
pub struct ScriptedRuntime {
    pub log: CallLog,
    pub initialized: Cell<u32>,
    on_start: RefCell<UnitHook>,
    on_stop: RefCell<UnitHook>,
}

impl ScriptedRuntime {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            initialized: Cell::new(0),
            on_start: RefCell::new(Box::new(|_| Ok(()))),
            on_stop: RefCell::new(Box::new(|_| Ok(()))),
        }
    }

    pub fn on_start(&self, hook: impl Fn(&UnitContext<'_>) -> anyhow::Result<()> + 'static) {
        *self.on_start.borrow_mut() = Box::new(hook);
    }

    pub fn on_stop(&self, hook: impl Fn(&UnitContext<'_>) -> anyhow::Result<()> + 'static) {
        *self.on_stop.borrow_mut() = Box::new(hook);
    }

    pub fn calls(&self, name: &str) -> usize {
        self.log.borrow().iter().filter(|c| *c == name).count()
    }
}

impl HostedRuntime for ScriptedRuntime {
    fn initialize(&self) -> anyhow::Result<()> {
        self.initialized.set(self.initialized.get() + 1);
        self.log.borrow_mut().push("initialize".to_string());
        Ok(())
    }

    fn start_unit(&self, unit: &UnitContext<'_>) -> anyhow::Result<()> {
        self.log.borrow_mut().push("start_unit".to_string());
        (*self.on_start.borrow())(unit)
    }

    fn stop_unit(&self, unit: &UnitContext<'_>) -> anyhow::Result<()> {
        self.log.borrow_mut().push("stop_unit".to_string());
        (*self.on_stop.borrow())(unit)
    }
}

// ================================================================
// Packages
// ================================================================

pub fn manifest(main: &str) -> ResourceManifest {
    ResourceManifest {
        name: "freeroam".to_string(),
        runtime: "csharp".to_string(),
        main: main.to_string(),
        deps: Vec::new(),
    }
}

pub fn zip_package(manifest: Option<ResourceManifest>, files: &[(&str, &str)]) -> ZipPackage {
    let mut builder = PackageBuilder::new();
    if let Some(manifest) = manifest {
        builder = builder.manifest(manifest);
    }
    for (path, data) in files {
        builder = builder.file(path, *data);
    }
    ZipPackage::from_bytes(builder.build().unwrap()).unwrap()
}

pub fn empty_package() -> ZipPackage {
    zip_package(None, &[])
}
