//! Event demultiplexing.
//!
//! Routes one host notification to exactly one delegate, marshaling argument
//! collections and narrowing object handles on the way. Dispatch never fails:
//! an absent event and an unrecognized kind are both no-ops that still report
//! the event as handled, so hosts that grow new event kinds cannot crash an
//! older bridge.

use hostbridge_types::{BaseObject, Event};
use tracing::{debug, trace};

use crate::delegates::DelegateTable;
use crate::marshal::marshal;
use crate::resolver::{ObjectRef, narrow_known, narrow_object};

/// Routes events and object notifications into a [`DelegateTable`].
#[derive(Debug, Clone, Copy)]
pub struct EventDispatcher<'t> {
    delegates: &'t DelegateTable,
}

impl<'t> EventDispatcher<'t> {
    pub fn new(delegates: &'t DelegateTable) -> Self {
        Self { delegates }
    }

    /// Invokes the delegate matching `event`. Always returns `true`.
    pub fn dispatch(&self, event: Option<&Event<'_>>) -> bool {
        let Some(event) = event else {
            return true;
        };
        let delegates = self.delegates;

        match *event {
            Event::ServerMessage { name, args } => {
                let args = marshal(args);
                debug!(event = name, argc = args.len(), "Dispatching server message");
                delegates.invoke_server_message(name, &args);
            }
            Event::ClientMessage { name, args } => {
                let args = marshal(args);
                debug!(event = name, argc = args.len(), "Dispatching client message");
                delegates.invoke_client_message(name, &args);
            }
            Event::ConsoleCommand { name, args } => {
                let args = marshal(args.iter().map(String::as_str));
                debug!(event = name, argc = args.len(), "Dispatching console command");
                delegates.invoke_console_command(name, &args);
            }
            Event::UiMessage { target, name, args } => {
                let args = marshal(args);
                debug!(event = name, argc = args.len(), "Dispatching UI message");
                delegates.invoke_ui_message(target, name, &args);
            }
            Event::PlayerSpawn => delegates.invoke_player_spawn(),
            Event::PlayerDisconnect => delegates.invoke_player_disconnect(),
            Event::PlayerEnterVehicle { target, seat } => {
                delegates.invoke_player_enter_vehicle(narrow_object(target), seat);
            }
            Event::EntityCreated { target } => {
                let target = narrow_object(target);
                debug!(tag = %target.tag, "Dispatching entity created");
                delegates.invoke_entity_created(target);
            }
            Event::EntityDestroyed { target } => {
                let target = narrow_object(target);
                debug!(tag = %target.tag, "Dispatching entity destroyed");
                delegates.invoke_entity_destroyed(target);
            }
            Event::ResourceError { resource } => delegates.invoke_resource_error(resource),
            Event::ResourceStarted { resource } => delegates.invoke_resource_started(resource),
            Event::ResourceStopped { resource } => delegates.invoke_resource_stopped(resource),
            Event::KeyUp { code } => delegates.invoke_key_up(code),
            Event::KeyDown { code } => delegates.invoke_key_down(code),
            Event::Unrecognized { code } => {
                trace!(code, "Ignoring unrecognized event");
            }
        }
        true
    }

    pub fn tick(&self) {
        self.delegates.invoke_tick();
    }

    /// Forwards a created player or vehicle. Other objects are dropped.
    pub fn create_base_object(&self, object: Option<&dyn BaseObject>) {
        match object.and_then(narrow_known) {
            Some(ObjectRef::Player(player)) => {
                self.delegates.invoke_create_player(player, player.id());
            }
            Some(ObjectRef::Vehicle(vehicle)) => {
                self.delegates.invoke_create_vehicle(vehicle, vehicle.id());
            }
            None => trace!("Dropping create notification for object without concrete view"),
        }
    }

    /// Forwards a removed player or vehicle. Other objects are dropped.
    pub fn remove_base_object(&self, object: Option<&dyn BaseObject>) {
        match object.and_then(narrow_known) {
            Some(ObjectRef::Player(player)) => self.delegates.invoke_remove_player(player),
            Some(ObjectRef::Vehicle(vehicle)) => self.delegates.invoke_remove_vehicle(vehicle),
            None => trace!("Dropping remove notification for object without concrete view"),
        }
    }
}
