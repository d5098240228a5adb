//! A hosted runtime reached through C function pointers.

use std::ffi::{CString, c_char};
use std::ptr;

use anyhow::bail;
use hostbridge_host::{DelegateTable, HostedRuntime, UnitContext};
use tracing::debug;

pub type InitializeFn = unsafe extern "C" fn() -> bool;

/// Starts or stops a unit. The runtime binds its delegates through `table`
/// using the `hostbridge_set_<kind>_delegate` exports. `entry` is null when
/// no entry artifact is configured.
pub type UnitFn = unsafe extern "C" fn(
    table: *const DelegateTable,
    name: *const c_char,
    entry: *const c_char,
) -> bool;

/// Entry points of an externally loaded runtime.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeCallbacks {
    pub initialize: Option<InitializeFn>,
    pub start_unit: Option<UnitFn>,
    pub stop_unit: Option<UnitFn>,
}

/// [`HostedRuntime`] backed by [`RuntimeCallbacks`].
///
/// A missing `initialize` or `stop_unit` is treated as success; a missing
/// `start_unit` fails every start.
#[derive(Debug)]
pub struct ExternRuntime {
    callbacks: RuntimeCallbacks,
}

impl ExternRuntime {
    /// # Safety
    /// Every non-null callback must be safe to call from the thread that
    /// drives the bridge, for as long as this runtime lives.
    pub unsafe fn new(callbacks: RuntimeCallbacks) -> Self {
        Self { callbacks }
    }

    fn call_unit(callback: UnitFn, unit: &UnitContext<'_>) -> anyhow::Result<bool> {
        let name = CString::new(unit.name())?;
        let entry = unit.entry().map(CString::new).transpose()?;
        let entry_ptr = entry.as_ref().map_or(ptr::null(), |e| e.as_ptr());
        let table: *const DelegateTable = unit.delegates();
        Ok(unsafe { callback(table, name.as_ptr(), entry_ptr) })
    }
}

impl HostedRuntime for ExternRuntime {
    fn initialize(&self) -> anyhow::Result<()> {
        let Some(initialize) = self.callbacks.initialize else {
            return Ok(());
        };
        if !unsafe { initialize() } {
            bail!("runtime initialization failed");
        }
        Ok(())
    }

    fn start_unit(&self, unit: &UnitContext<'_>) -> anyhow::Result<()> {
        let Some(start) = self.callbacks.start_unit else {
            bail!("runtime has no start_unit entry point");
        };
        if !Self::call_unit(start, unit)? {
            bail!("runtime refused to start {}", unit.name());
        }
        debug!(unit = %unit.name(), "Extern runtime started unit");
        Ok(())
    }

    fn stop_unit(&self, unit: &UnitContext<'_>) -> anyhow::Result<()> {
        let Some(stop) = self.callbacks.stop_unit else {
            return Ok(());
        };
        if !Self::call_unit(stop, unit)? {
            bail!("runtime failed to stop {}", unit.name());
        }
        Ok(())
    }
}
