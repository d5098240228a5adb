//! C ABI for runtimes that live outside Rust.
//!
//! A runtime loaded as a native library binds its callbacks into the
//! bridge's delegate table with the `hostbridge_set_<kind>_delegate`
//! exports, and an embedder wraps its entry points in [`ExternRuntime`].
//! Message values stay owned by the host; the runtime receives opaque
//! pointers and can render one as JSON with [`hostbridge_value_to_json`].
//!
//! Every export must be called from the thread that drives the bridge.

mod delegates;
mod runtime;

pub use delegates::*;
pub use runtime::{ExternRuntime, InitializeFn, RuntimeCallbacks, UnitFn};

use std::ffi::{CString, c_char};
use std::ptr;

use hostbridge_types::Value;

/// Renders a host value as JSON. Returns null for a null value.
///
/// # Safety
/// `value` must be null or point to a live `Value`. The result must be freed
/// with [`hostbridge_free_string`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hostbridge_value_to_json(value: *const Value) -> *mut c_char {
    let Some(value) = (unsafe { value.as_ref() }) else {
        return ptr::null_mut();
    };
    let json = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
    CString::new(json).unwrap_or_default().into_raw()
}

/// Frees a string returned by this library.
///
/// # Safety
/// `s` must be null or a pointer previously returned by this library and not
/// yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hostbridge_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostbridge_host::{DelegateKind, DelegateTable, HostResource, ResourceBridge};
    use hostbridge_package::{Package, PackageBuilder, ZipPackage};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::ffi::CStr;

    #[test]
    fn value_renders_as_tagged_json() {
        let value = Value::from("hi");
        unsafe {
            let json = hostbridge_value_to_json(&value);
            assert_eq!(
                CStr::from_ptr(json).to_str().unwrap(),
                r#"{"type":"string","value":"hi"}"#
            );
            hostbridge_free_string(json);
            assert!(hostbridge_value_to_json(ptr::null()).is_null());
            hostbridge_free_string(ptr::null_mut());
        }
    }

    struct Host {
        package: ZipPackage,
        natives: Cell<bool>,
    }

    impl HostResource for Host {
        fn name(&self) -> &str {
            "chat"
        }

        fn package(&self) -> &dyn Package {
            &self.package
        }

        fn enable_natives(&self) {
            self.natives.set(true);
        }
    }

    unsafe extern "C" fn noop_key(_code: u32) {}

    unsafe extern "C" fn start_binding_keys(
        table: *const DelegateTable,
        name: *const c_char,
        entry: *const c_char,
    ) -> bool {
        let name = unsafe { CStr::from_ptr(name) };
        assert_eq!(name.to_str().unwrap(), "chat");
        assert!(entry.is_null());
        unsafe { hostbridge_set_key_down_delegate(table, Some(noop_key)) }
    }

    unsafe extern "C" fn refuse(
        _table: *const DelegateTable,
        _name: *const c_char,
        _entry: *const c_char,
    ) -> bool {
        false
    }

    fn host() -> Host {
        let bytes = PackageBuilder::new().build().unwrap();
        Host {
            package: ZipPackage::from_bytes(bytes).unwrap(),
            natives: Cell::new(false),
        }
    }

    #[test]
    fn extern_runtime_binds_through_exports() {
        let runtime = unsafe {
            ExternRuntime::new(RuntimeCallbacks {
                start_unit: Some(start_binding_keys),
                ..Default::default()
            })
        };
        let bridge = ResourceBridge::new(host(), runtime);

        assert!(bridge.start());
        assert!(bridge.host().natives.get());
        assert_eq!(bridge.delegates().bound_kinds(), vec![DelegateKind::KeyDown]);
        assert!(bridge.stop());
        assert!(bridge.delegates().bound_kinds().is_empty());
    }

    #[test]
    fn refused_start_fails() {
        let runtime = unsafe {
            ExternRuntime::new(RuntimeCallbacks {
                start_unit: Some(refuse),
                ..Default::default()
            })
        };
        let bridge = ResourceBridge::new(host(), runtime);
        assert!(!bridge.start());

        let runtime = unsafe { ExternRuntime::new(RuntimeCallbacks::default()) };
        let bridge = ResourceBridge::new(host(), runtime);
        assert!(!bridge.start());
    }
}
