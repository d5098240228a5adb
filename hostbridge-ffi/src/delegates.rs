//! Delegate setters for runtimes that bind through the C ABI.
//!
//! Each `hostbridge_set_<kind>_delegate` export wraps a C callback in a
//! closure and binds it into the table. A null callback rebinds the slot to
//! its no-op. Arguments cross the boundary as follows:
//!
//! - names become NUL-terminated strings valid for the call only;
//! - value lists arrive as a pointer array plus count, null and 0 when empty;
//! - console arguments arrive as a string array plus count, null and 0 when
//!   empty;
//! - objects arrive as thin pointers to the host object. Entity
//!   notifications add the raw type tag, and their pointer is null when the
//!   object has no concrete view; vehicle entry always forwards the target.

use std::ffi::{CString, c_char, c_void};
use std::ptr;

use hostbridge_host::{DelegateKind, DelegateTable, Marshaled, Narrowed, ObjectRef};
use hostbridge_types::Value;
use tracing::warn;

pub type TickFn = unsafe extern "C" fn();
pub type MessageFn = unsafe extern "C" fn(name: *const c_char, args: *const *const Value, count: u64);
pub type ConsoleCommandFn =
    unsafe extern "C" fn(name: *const c_char, args: *const *const c_char, count: u64);
pub type UiMessageFn = unsafe extern "C" fn(
    target: *const c_void,
    name: *const c_char,
    args: *const *const Value,
    count: u64,
);
pub type CreateObjectFn = unsafe extern "C" fn(object: *const c_void, id: u16);
pub type RemoveObjectFn = unsafe extern "C" fn(object: *const c_void);
pub type NotifyFn = unsafe extern "C" fn();
pub type EnterVehicleFn = unsafe extern "C" fn(vehicle: *const c_void, seat: u8);
pub type EntityFn = unsafe extern "C" fn(entity: *const c_void, tag: u8);
pub type ResourceFn = unsafe extern "C" fn(resource: *const c_char);
pub type KeyFn = unsafe extern "C" fn(code: u32);

fn c_string(s: &str) -> CString {
    CString::new(s).unwrap_or_default()
}

fn object_ptr<T: ?Sized>(object: &T) -> *const c_void {
    (object as *const T).cast::<c_void>()
}

fn narrowed_parts(target: Narrowed<'_>) -> (*const c_void, u8) {
    let ptr = match target.object {
        Some(ObjectRef::Player(player)) => object_ptr(player),
        Some(ObjectRef::Vehicle(vehicle)) => object_ptr(vehicle),
        None => ptr::null(),
    };
    (ptr, target.tag.as_raw())
}

/// Console arguments converted to C strings, kept alive for one call.
struct CStringArgs {
    _owned: Vec<CString>,
    ptrs: Vec<*const c_char>,
}

impl CStringArgs {
    fn new(args: &Marshaled<'_, str>) -> Self {
        let owned: Vec<CString> = args.iter().map(c_string).collect();
        let ptrs = owned.iter().map(|s| s.as_ptr()).collect();
        Self {
            _owned: owned,
            ptrs,
        }
    }

    fn as_raw_parts(&self) -> (*const *const c_char, u64) {
        if self.ptrs.is_empty() {
            (ptr::null(), 0)
        } else {
            (self.ptrs.as_ptr(), self.ptrs.len() as u64)
        }
    }
}

macro_rules! delegate_setter {
    (
        $(#[$meta:meta])*
        $export:ident, $kind:ident, $callback:ty, |$table:ident, $f:ident| $bind:expr
    ) => {
        $(#[$meta])*
        ///
        /// # Safety
        /// `table` must be null or point to a live `DelegateTable` owned by the
        /// calling thread. `callback` must stay callable until the slot is
        /// reset or rebound.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $export(
            table: *const DelegateTable,
            callback: Option<$callback>,
        ) -> bool {
            let Some($table) = (unsafe { table.as_ref() }) else {
                warn!(kind = ?DelegateKind::$kind, "Delegate setter called with null table");
                return false;
            };
            match callback {
                Some($f) => $bind,
                None => $table.reset(DelegateKind::$kind),
            }
            true
        }
    };
}

delegate_setter! {
    /// Binds the per-frame tick.
    hostbridge_set_tick_delegate, Tick, TickFn, |table, f| {
        table.bind_tick(move || unsafe { f() })
    }
}

delegate_setter! {
    hostbridge_set_server_message_delegate, ServerMessage, MessageFn, |table, f| {
        table.bind_server_message(move |name, args| {
            let name = c_string(name);
            let (args, count) = args.as_raw_parts();
            unsafe { f(name.as_ptr(), args, count) }
        })
    }
}

delegate_setter! {
    hostbridge_set_client_message_delegate, ClientMessage, MessageFn, |table, f| {
        table.bind_client_message(move |name, args| {
            let name = c_string(name);
            let (args, count) = args.as_raw_parts();
            unsafe { f(name.as_ptr(), args, count) }
        })
    }
}

delegate_setter! {
    hostbridge_set_console_command_delegate, ConsoleCommand, ConsoleCommandFn, |table, f| {
        table.bind_console_command(move |name, args| {
            let name = c_string(name);
            let args = CStringArgs::new(args);
            let (argv, count) = args.as_raw_parts();
            unsafe { f(name.as_ptr(), argv, count) }
        })
    }
}

delegate_setter! {
    hostbridge_set_ui_message_delegate, UiMessage, UiMessageFn, |table, f| {
        table.bind_ui_message(move |target, name, args| {
            let name = c_string(name);
            let (args, count) = args.as_raw_parts();
            unsafe { f(object_ptr(target), name.as_ptr(), args, count) }
        })
    }
}

delegate_setter! {
    hostbridge_set_create_player_delegate, CreatePlayer, CreateObjectFn, |table, f| {
        table.bind_create_player(move |player, id| unsafe { f(object_ptr(player), id.get()) })
    }
}

delegate_setter! {
    hostbridge_set_remove_player_delegate, RemovePlayer, RemoveObjectFn, |table, f| {
        table.bind_remove_player(move |player| unsafe { f(object_ptr(player)) })
    }
}

delegate_setter! {
    hostbridge_set_create_vehicle_delegate, CreateVehicle, CreateObjectFn, |table, f| {
        table.bind_create_vehicle(move |vehicle, id| unsafe { f(object_ptr(vehicle), id.get()) })
    }
}

delegate_setter! {
    hostbridge_set_remove_vehicle_delegate, RemoveVehicle, RemoveObjectFn, |table, f| {
        table.bind_remove_vehicle(move |vehicle| unsafe { f(object_ptr(vehicle)) })
    }
}

delegate_setter! {
    hostbridge_set_player_spawn_delegate, PlayerSpawn, NotifyFn, |table, f| {
        table.bind_player_spawn(move || unsafe { f() })
    }
}

delegate_setter! {
    hostbridge_set_player_disconnect_delegate, PlayerDisconnect, NotifyFn, |table, f| {
        table.bind_player_disconnect(move || unsafe { f() })
    }
}

delegate_setter! {
    /// The vehicle pointer is the delivered target, even when it has no
    /// vehicle view.
    hostbridge_set_player_enter_vehicle_delegate, PlayerEnterVehicle, EnterVehicleFn, |table, f| {
        table.bind_player_enter_vehicle(move |target, seat| unsafe {
            f(object_ptr(target.handle), seat)
        })
    }
}

delegate_setter! {
    hostbridge_set_entity_created_delegate, EntityCreated, EntityFn, |table, f| {
        table.bind_entity_created(move |target| {
            let (entity, tag) = narrowed_parts(target);
            unsafe { f(entity, tag) }
        })
    }
}

delegate_setter! {
    hostbridge_set_entity_destroyed_delegate, EntityDestroyed, EntityFn, |table, f| {
        table.bind_entity_destroyed(move |target| {
            let (entity, tag) = narrowed_parts(target);
            unsafe { f(entity, tag) }
        })
    }
}

delegate_setter! {
    hostbridge_set_resource_error_delegate, ResourceError, ResourceFn, |table, f| {
        table.bind_resource_error(move |resource| {
            let resource = c_string(resource);
            unsafe { f(resource.as_ptr()) }
        })
    }
}

delegate_setter! {
    hostbridge_set_resource_started_delegate, ResourceStarted, ResourceFn, |table, f| {
        table.bind_resource_started(move |resource| {
            let resource = c_string(resource);
            unsafe { f(resource.as_ptr()) }
        })
    }
}

delegate_setter! {
    hostbridge_set_resource_stopped_delegate, ResourceStopped, ResourceFn, |table, f| {
        table.bind_resource_stopped(move |resource| {
            let resource = c_string(resource);
            unsafe { f(resource.as_ptr()) }
        })
    }
}

delegate_setter! {
    hostbridge_set_key_up_delegate, KeyUp, KeyFn, |table, f| {
        table.bind_key_up(move |code| unsafe { f(code) })
    }
}

delegate_setter! {
    hostbridge_set_key_down_delegate, KeyDown, KeyFn, |table, f| {
        table.bind_key_down(move |code| unsafe { f(code) })
    }
}
