//! Unit lifecycle: sequences start, stop and every host entry point around
//! the hosted runtime.
//!
//! `ResourceBridge` is the single object a host talks to. It owns the
//! delegate table and the reentrancy counter, and it is deliberately
//! single-threaded: every entry point takes `&self` so that a delegate may
//! call back into the same bridge while an outer call is still in flight.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hostbridge_package::{ResourceFileReader, ResourceManifest};
use hostbridge_types::{BaseObject, Event};
use tracing::{debug, info, warn};

use crate::config::UnitConfig;
use crate::delegates::DelegateTable;
use crate::dispatcher::EventDispatcher;
use crate::error::BridgeError;
use crate::runtime::{HostResource, HostedRuntime, UnitContext};
use crate::scope::ScopeCounter;

/// Lifecycle state of the hosted unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    Unstarted,
    Running,
    Stopped,
}

/// Bridges one host resource to one hosted unit.
pub struct ResourceBridge<H, R> {
    host: H,
    runtime: R,
    config: UnitConfig,
    delegates: DelegateTable,
    scope: ScopeCounter,
    state: Cell<UnitState>,
    /// Manifest read on the last successful start, reused by stop.
    manifest: RefCell<Option<Rc<ResourceManifest>>>,
}

impl<H: HostResource, R: HostedRuntime> ResourceBridge<H, R> {
    pub fn new(host: H, runtime: R) -> Self {
        Self::with_config(host, runtime, UnitConfig::default())
    }

    pub fn with_config(host: H, runtime: R, config: UnitConfig) -> Self {
        let delegates = DelegateTable::new();
        delegates.reset_all();
        Self {
            host,
            runtime,
            config,
            delegates,
            scope: ScopeCounter::new(),
            state: Cell::new(UnitState::Unstarted),
            manifest: RefCell::new(None),
        }
    }

    // ================================================================
    // Lifecycle
    // ================================================================

    /// Starts the unit, reporting only success or failure.
    pub fn start(&self) -> bool {
        match self.try_start() {
            Ok(()) => true,
            Err(e) => {
                warn!(unit = %self.host.name(), "Start failed: {}", e);
                false
            }
        }
    }

    /// Stops the unit, reporting only success or failure.
    pub fn stop(&self) -> bool {
        match self.try_stop() {
            Ok(()) => true,
            Err(e) => {
                warn!(unit = %self.host.name(), "Stop failed: {}", e);
                false
            }
        }
    }

    /// Initializes the runtime, enables natives, then starts the unit inside
    /// a reentrancy scope with a freshly reset delegate table.
    pub fn try_start(&self) -> Result<(), BridgeError> {
        let name = self.host.name();
        if self.state.get() == UnitState::Running {
            return Err(BridgeError::AlreadyRunning(name.to_string()));
        }

        info!(unit = %name, "Starting unit");
        self.runtime
            .initialize()
            .map_err(|e| BridgeError::runtime(name, e))?;
        self.host.enable_natives();

        let _scope = self.scope.enter();
        self.delegates.reset_all();

        let manifest = self.load_manifest()?;
        let unit = self.unit_context(manifest.as_deref());
        if let Err(e) = self.runtime.start_unit(&unit) {
            self.delegates.reset_all();
            return Err(BridgeError::runtime(name, e));
        }

        *self.manifest.borrow_mut() = manifest;
        self.state.set(UnitState::Running);
        info!(
            unit = %name,
            bound = self.delegates.bound_kinds().len(),
            "Unit started"
        );
        Ok(())
    }

    /// Stops the unit inside a reentrancy scope, then resets every delegate.
    ///
    /// The reset happens even when the runtime reports a failed stop, and the
    /// unit counts as stopped either way.
    pub fn try_stop(&self) -> Result<(), BridgeError> {
        let name = self.host.name();
        if self.state.get() != UnitState::Running {
            return Err(BridgeError::NotRunning(name.to_string()));
        }

        let _scope = self.scope.enter();
        info!(unit = %name, "Stopping unit");

        let manifest = self.manifest.borrow().clone();
        let unit = self.unit_context(manifest.as_deref());
        let result = self.runtime.stop_unit(&unit);
        self.delegates.reset_all();
        self.state.set(UnitState::Stopped);

        result.map_err(|e| BridgeError::runtime(name, e))?;
        info!(unit = %name, "Unit stopped");
        Ok(())
    }

    fn load_manifest(&self) -> Result<Option<Rc<ResourceManifest>>, BridgeError> {
        if !self.config.load_manifest {
            return Ok(None);
        }
        let reader = ResourceFileReader::new(self.host.package());
        let manifest = ResourceManifest::load(&reader)?;
        if let Some(ref m) = manifest {
            debug!(unit = %m.name, runtime = %m.runtime, main = %m.main, "Loaded resource manifest");
        }
        Ok(manifest.map(Rc::new))
    }

    fn unit_context<'a>(&'a self, manifest: Option<&'a ResourceManifest>) -> UnitContext<'a> {
        let entry = self
            .config
            .entry
            .as_deref()
            .or(manifest.map(|m| m.main.as_str()));
        UnitContext::new(
            self.host.name(),
            entry,
            manifest,
            &self.delegates,
            self.host.package(),
        )
    }

    // ================================================================
    // Host entry points
    // ================================================================

    /// Dispatches one host event inside a reentrancy scope. Always `true`.
    pub fn on_event(&self, event: Option<&Event<'_>>) -> bool {
        let Some(event) = event else {
            return true;
        };
        let _scope = self.scope.enter();
        self.dispatcher().dispatch(Some(event))
    }

    pub fn on_tick(&self) {
        self.dispatcher().tick();
    }

    pub fn on_create_base_object(&self, object: Option<&dyn BaseObject>) {
        self.dispatcher().create_base_object(object);
    }

    pub fn on_remove_base_object(&self, object: Option<&dyn BaseObject>) {
        self.dispatcher().remove_base_object(object);
    }

    /// Reads a file from the resource's package. Missing files read as empty.
    pub fn read_file(&self, path: &str) -> Result<Vec<u8>, BridgeError> {
        Ok(ResourceFileReader::new(self.host.package()).read(path)?)
    }

    // ================================================================
    // Accessors
    // ================================================================

    pub fn dispatcher(&self) -> EventDispatcher<'_> {
        EventDispatcher::new(&self.delegates)
    }

    pub fn delegates(&self) -> &DelegateTable {
        &self.delegates
    }

    pub fn state(&self) -> UnitState {
        self.state.get()
    }

    pub fn scope(&self) -> &ScopeCounter {
        &self.scope
    }

    /// Whether native calls may currently re-enter the bridge.
    pub fn natives_permitted(&self) -> bool {
        self.scope.is_active()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }
}
