//! The delegate table: one bound callback per notification kind.
//!
//! Every slot always holds something callable. A fresh table, and every
//! table after [`DelegateTable::reset_all`], holds a no-op of the right arity
//! in each slot, so invoking any kind is always safe. Binding replaces the
//! slot's callable (last write wins).
//!
//! Delegates are `'static` closures and every handle they receive is
//! borrowed for the call only, so a delegate cannot keep a host handle past
//! the call it was given in.
//!
//! The table is single-threaded (`!Send`, `!Sync`). Invocation clones the
//! slot's callable out before calling it, which makes nested invocation and
//! rebinding from inside a running delegate both legal: the running call
//! finishes with the callable it started with.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use hostbridge_types::{BaseObject, EntityId, EventKind, Player, Value, Vehicle};
use tracing::debug;

use crate::marshal::Marshaled;
use crate::resolver::Narrowed;

struct Slot<F: ?Sized> {
    callable: RefCell<Rc<F>>,
    bound: Cell<bool>,
}

impl<F: ?Sized> Slot<F> {
    fn new(noop: Rc<F>) -> Self {
        Self {
            callable: RefCell::new(noop),
            bound: Cell::new(false),
        }
    }

    fn get(&self) -> Rc<F> {
        Rc::clone(&self.callable.borrow())
    }

    fn set(&self, callable: Rc<F>, bound: bool) {
        *self.callable.borrow_mut() = callable;
        self.bound.set(bound);
    }
}

macro_rules! delegate_table {
    (
        $(
            $(#[$meta:meta])*
            $kind:ident => $field:ident, $bind:ident, $invoke:ident ( $( $arg:ident : $ty:ty ),* );
        )*
    ) => {
        /// Every slot in the delegate table.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum DelegateKind {
            $( $(#[$meta])* $kind, )*
        }

        impl DelegateKind {
            pub const ALL: &'static [DelegateKind] = &[ $( DelegateKind::$kind, )* ];
        }

        /// Registry of bound callbacks, one per [`DelegateKind`].
        pub struct DelegateTable {
            $( $field: Slot<dyn Fn($($ty),*)>, )*
        }

        impl DelegateTable {
            /// Creates a table with every slot bound to its no-op.
            pub fn new() -> Self {
                Self {
                    $(
                        $field: Slot::new({
                            fn noop($(_: $ty),*) {}
                            let noop: Rc<dyn Fn($($ty),*)> = Rc::new(noop);
                            noop
                        }),
                    )*
                }
            }

            /// Rebinds `kind` to its no-op.
            pub fn reset(&self, kind: DelegateKind) {
                match kind {
                    $(
                        DelegateKind::$kind => {
                            fn noop($(_: $ty),*) {}
                            let noop: Rc<dyn Fn($($ty),*)> = Rc::new(noop);
                            self.$field.set(noop, false);
                        }
                    )*
                }
            }

            /// Whether `kind` currently holds something other than its no-op.
            pub fn is_bound(&self, kind: DelegateKind) -> bool {
                match kind {
                    $( DelegateKind::$kind => self.$field.bound.get(), )*
                }
            }

            $(
                pub fn $bind(&self, delegate: impl Fn($($ty),*) + 'static) {
                    debug!(kind = ?DelegateKind::$kind, "Delegate bound");
                    self.$field.set(Rc::new(delegate), true);
                }

                pub fn $invoke(&self, $( $arg: $ty ),*) {
                    let delegate = self.$field.get();
                    delegate($( $arg ),*);
                }
            )*
        }
    };
}

delegate_table! {
    /// Per-frame tick.
    Tick => tick, bind_tick, invoke_tick();
    ServerMessage => server_message, bind_server_message, invoke_server_message(
        name: &str, args: &Marshaled<'_, Value>
    );
    ClientMessage => client_message, bind_client_message, invoke_client_message(
        name: &str, args: &Marshaled<'_, Value>
    );
    ConsoleCommand => console_command, bind_console_command, invoke_console_command(
        name: &str, args: &Marshaled<'_, str>
    );
    UiMessage => ui_message, bind_ui_message, invoke_ui_message(
        target: &dyn BaseObject, name: &str, args: &Marshaled<'_, Value>
    );
    CreatePlayer => create_player, bind_create_player, invoke_create_player(
        player: &dyn Player, id: EntityId
    );
    RemovePlayer => remove_player, bind_remove_player, invoke_remove_player(
        player: &dyn Player
    );
    CreateVehicle => create_vehicle, bind_create_vehicle, invoke_create_vehicle(
        vehicle: &dyn Vehicle, id: EntityId
    );
    RemoveVehicle => remove_vehicle, bind_remove_vehicle, invoke_remove_vehicle(
        vehicle: &dyn Vehicle
    );
    PlayerSpawn => player_spawn, bind_player_spawn, invoke_player_spawn();
    PlayerDisconnect => player_disconnect, bind_player_disconnect, invoke_player_disconnect();
    PlayerEnterVehicle => player_enter_vehicle, bind_player_enter_vehicle, invoke_player_enter_vehicle(
        target: Narrowed<'_>, seat: u8
    );
    EntityCreated => entity_created, bind_entity_created, invoke_entity_created(
        target: Narrowed<'_>
    );
    EntityDestroyed => entity_destroyed, bind_entity_destroyed, invoke_entity_destroyed(
        target: Narrowed<'_>
    );
    ResourceError => resource_error, bind_resource_error, invoke_resource_error(resource: &str);
    ResourceStarted => resource_started, bind_resource_started, invoke_resource_started(resource: &str);
    ResourceStopped => resource_stopped, bind_resource_stopped, invoke_resource_stopped(resource: &str);
    KeyUp => key_up, bind_key_up, invoke_key_up(code: u32);
    KeyDown => key_down, bind_key_down, invoke_key_down(code: u32);
}

impl DelegateTable {
    /// Rebinds every slot to its no-op.
    ///
    /// Runs before each start and after each stop so that a restarted unit
    /// never reaches callbacks bound by a runtime that has since been torn
    /// down.
    pub fn reset_all(&self) {
        for &kind in DelegateKind::ALL {
            self.reset(kind);
        }
        debug!("All delegates reset");
    }

    /// Kinds currently bound to something other than their no-op.
    pub fn bound_kinds(&self) -> Vec<DelegateKind> {
        DelegateKind::ALL
            .iter()
            .copied()
            .filter(|&kind| self.is_bound(kind))
            .collect()
    }
}

impl Default for DelegateTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DelegateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateTable")
            .field("bound", &self.bound_kinds())
            .finish()
    }
}

impl From<EventKind> for DelegateKind {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::ServerMessage => Self::ServerMessage,
            EventKind::ClientMessage => Self::ClientMessage,
            EventKind::ConsoleCommand => Self::ConsoleCommand,
            EventKind::UiMessage => Self::UiMessage,
            EventKind::PlayerSpawn => Self::PlayerSpawn,
            EventKind::PlayerDisconnect => Self::PlayerDisconnect,
            EventKind::PlayerEnterVehicle => Self::PlayerEnterVehicle,
            EventKind::EntityCreated => Self::EntityCreated,
            EventKind::EntityDestroyed => Self::EntityDestroyed,
            EventKind::ResourceError => Self::ResourceError,
            EventKind::ResourceStarted => Self::ResourceStarted,
            EventKind::ResourceStopped => Self::ResourceStopped,
            EventKind::KeyUp => Self::KeyUp,
            EventKind::KeyDown => Self::KeyDown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marshal::marshal;

    #[test]
    fn fresh_table_has_nothing_bound() {
        let table = DelegateTable::new();
        assert!(table.bound_kinds().is_empty());
        assert_eq!(DelegateKind::ALL.len(), 19);
    }

    #[test]
    fn bind_then_invoke() {
        let table = DelegateTable::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        table.bind_key_down(move |code| sink.borrow_mut().push(code));

        table.invoke_key_down(65);
        table.invoke_key_up(66);

        assert_eq!(*seen.borrow(), vec![65]);
        assert!(table.is_bound(DelegateKind::KeyDown));
        assert!(!table.is_bound(DelegateKind::KeyUp));
    }

    #[test]
    fn last_bind_wins() {
        let table = DelegateTable::new();
        let seen = Rc::new(Cell::new(0));
        let a = Rc::clone(&seen);
        let b = Rc::clone(&seen);
        table.bind_tick(move || a.set(1));
        table.bind_tick(move || b.set(2));
        table.invoke_tick();
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn reset_single_kind() {
        let table = DelegateTable::new();
        table.bind_tick(|| panic!("should have been reset"));
        table.bind_key_up(|_| {});
        table.reset(DelegateKind::Tick);
        table.invoke_tick();
        assert_eq!(table.bound_kinds(), vec![DelegateKind::KeyUp]);
    }

    #[test]
    fn rebind_during_invoke_finishes_running_call() {
        let table = Rc::new(DelegateTable::new());
        let calls = Rc::new(Cell::new(0));
        let inner_table = Rc::downgrade(&table);
        let counter = Rc::clone(&calls);
        table.bind_server_message(move |_, _| {
            counter.set(counter.get() + 1);
            if let Some(t) = inner_table.upgrade() {
                t.reset(DelegateKind::ServerMessage);
            }
        });

        let args = marshal(&[] as &[Value]);
        table.invoke_server_message("a", &args);
        table.invoke_server_message("b", &args);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn event_kinds_map_to_distinct_slots() {
        use std::collections::HashSet;
        let slots: HashSet<DelegateKind> =
            EventKind::ALL.into_iter().map(DelegateKind::from).collect();
        assert_eq!(slots.len(), EventKind::ALL.len());
        assert!(!slots.contains(&DelegateKind::Tick));
    }
}
