//! Event notifications delivered by the host.
//!
//! An `Event` borrows everything it carries from the host and is only valid
//! for the duration of the dispatch call it was passed to. The variant is the
//! tag: a payload can never disagree with its kind.
//!
//! Hosts newer than this bridge may emit kinds it has never heard of. Those
//! arrive as `Event::Unrecognized` and are ignored by dispatch instead of
//! being treated as faults.

use crate::{BaseObject, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of event kinds the bridge knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ServerMessage,
    ClientMessage,
    ConsoleCommand,
    UiMessage,
    PlayerSpawn,
    PlayerDisconnect,
    PlayerEnterVehicle,
    EntityCreated,
    EntityDestroyed,
    ResourceError,
    ResourceStarted,
    ResourceStopped,
    KeyUp,
    KeyDown,
}

impl EventKind {
    pub const ALL: [EventKind; 14] = [
        Self::ServerMessage,
        Self::ClientMessage,
        Self::ConsoleCommand,
        Self::UiMessage,
        Self::PlayerSpawn,
        Self::PlayerDisconnect,
        Self::PlayerEnterVehicle,
        Self::EntityCreated,
        Self::EntityDestroyed,
        Self::ResourceError,
        Self::ResourceStarted,
        Self::ResourceStopped,
        Self::KeyUp,
        Self::KeyDown,
    ];

    /// Stable snake_case name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ServerMessage => "server_message",
            Self::ClientMessage => "client_message",
            Self::ConsoleCommand => "console_command",
            Self::UiMessage => "ui_message",
            Self::PlayerSpawn => "player_spawn",
            Self::PlayerDisconnect => "player_disconnect",
            Self::PlayerEnterVehicle => "player_enter_vehicle",
            Self::EntityCreated => "entity_created",
            Self::EntityDestroyed => "entity_destroyed",
            Self::ResourceError => "resource_error",
            Self::ResourceStarted => "resource_started",
            Self::ResourceStopped => "resource_stopped",
            Self::KeyUp => "key_up",
            Self::KeyDown => "key_down",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| crate::Error::UnknownEventKind(s.to_string()))
    }
}

/// Key transition reported by the host's keyboard notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyState {
    Up,
    Down,
}

/// One notification from the host, borrowed for a single dispatch call.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// A script message sent by the server.
    ServerMessage { name: &'a str, args: &'a [Value] },

    /// A script message sent by another client-side unit.
    ClientMessage { name: &'a str, args: &'a [Value] },

    /// A console command typed by the local user.
    ConsoleCommand { name: &'a str, args: &'a [String] },

    /// A message emitted by an embedded UI view.
    UiMessage {
        /// The view that emitted the message.
        target: &'a dyn BaseObject,
        name: &'a str,
        args: &'a [Value],
    },

    PlayerSpawn,

    PlayerDisconnect,

    PlayerEnterVehicle {
        /// The vehicle that was entered.
        target: &'a dyn BaseObject,
        seat: u8,
    },

    /// A game entity streamed in.
    EntityCreated { target: &'a dyn BaseObject },

    /// A game entity streamed out.
    EntityDestroyed { target: &'a dyn BaseObject },

    ResourceError { resource: &'a str },

    ResourceStarted { resource: &'a str },

    ResourceStopped { resource: &'a str },

    KeyUp { code: u32 },

    KeyDown { code: u32 },

    /// A kind introduced by a newer host. Carries only the raw type code.
    Unrecognized { code: u16 },
}

impl<'a> Event<'a> {
    /// Classifies the host's combined keyboard notification.
    #[must_use]
    pub fn keyboard(code: u32, state: KeyState) -> Self {
        match state {
            KeyState::Up => Self::KeyUp { code },
            KeyState::Down => Self::KeyDown { code },
        }
    }

    /// The routed kind, or `None` for an unrecognized event.
    #[must_use]
    pub fn kind(&self) -> Option<EventKind> {
        let kind = match self {
            Self::ServerMessage { .. } => EventKind::ServerMessage,
            Self::ClientMessage { .. } => EventKind::ClientMessage,
            Self::ConsoleCommand { .. } => EventKind::ConsoleCommand,
            Self::UiMessage { .. } => EventKind::UiMessage,
            Self::PlayerSpawn => EventKind::PlayerSpawn,
            Self::PlayerDisconnect => EventKind::PlayerDisconnect,
            Self::PlayerEnterVehicle { .. } => EventKind::PlayerEnterVehicle,
            Self::EntityCreated { .. } => EventKind::EntityCreated,
            Self::EntityDestroyed { .. } => EventKind::EntityDestroyed,
            Self::ResourceError { .. } => EventKind::ResourceError,
            Self::ResourceStarted { .. } => EventKind::ResourceStarted,
            Self::ResourceStopped { .. } => EventKind::ResourceStopped,
            Self::KeyUp { .. } => EventKind::KeyUp,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::Unrecognized { .. } => return None,
        };
        Some(kind)
    }

    /// The message or resource name, for kinds identified by one.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        match *self {
            Self::ServerMessage { name, .. }
            | Self::ClientMessage { name, .. }
            | Self::ConsoleCommand { name, .. }
            | Self::UiMessage { name, .. } => Some(name),
            Self::ResourceError { resource }
            | Self::ResourceStarted { resource }
            | Self::ResourceStopped { resource } => Some(resource),
            _ => None,
        }
    }
}
