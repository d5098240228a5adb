//! Host-facing type definitions for hostbridge.
//!
//! This crate defines what the native host hands to the bridge:
//! - `Event`, a borrowed tagged union valid only for one dispatch call
//! - `Value`, the host-owned value tree referenced by message arguments
//! - `BaseObject` and its concrete `Player` / `Vehicle` views
//! - Entity identifiers
//!
//! Nothing here owns host memory. Every handle is a borrow whose lifetime
//! ends when the call that delivered it returns.

mod event;
mod ids;
mod object;
mod value;

pub use event::{Event, EventKind, KeyState};
pub use ids::EntityId;
pub use object::{BaseObject, BaseObjectType, Player, Vehicle};
pub use value::Value;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid entity id: {0}")]
    InvalidEntityId(#[from] std::num::ParseIntError),

    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),
}
