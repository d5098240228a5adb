//! Polymorphic handles to host-owned objects.
//!
//! The host exposes every object through a single base handle that carries a
//! runtime type tag. Only players and vehicles have concrete views the bridge
//! knows how to forward; every other tag is preserved as `Other(raw)` so that
//! objects introduced by newer hosts still carry their identity.

use crate::EntityId;
use std::fmt;

const RAW_PLAYER: u8 = 0;
const RAW_VEHICLE: u8 = 1;

/// Runtime type tag of a host base object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseObjectType {
    Player,
    Vehicle,
    /// Any tag without a concrete view on this side of the bridge.
    Other(u8),
}

impl BaseObjectType {
    /// Classifies a raw host tag.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            RAW_PLAYER => Self::Player,
            RAW_VEHICLE => Self::Vehicle,
            other => Self::Other(other),
        }
    }

    /// Returns the raw host tag.
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        match self {
            Self::Player => RAW_PLAYER,
            Self::Vehicle => RAW_VEHICLE,
            Self::Other(raw) => raw,
        }
    }

    /// Whether the tag has a concrete view (player or vehicle).
    #[must_use]
    pub const fn is_known(self) -> bool {
        matches!(self, Self::Player | Self::Vehicle)
    }
}

impl From<u8> for BaseObjectType {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for BaseObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => f.write_str("player"),
            Self::Vehicle => f.write_str("vehicle"),
            Self::Other(raw) => write!(f, "other({raw})"),
        }
    }
}

/// Base view of a host-owned object.
///
/// Implemented by the host for each object it hands across the bridge. The
/// `as_*` casts return the concrete view only when the object really is that
/// variant; they never allocate or take ownership.
pub trait BaseObject: fmt::Debug {
    /// The runtime type tag reported by the host.
    fn object_type(&self) -> BaseObjectType;

    fn as_player(&self) -> Option<&dyn Player> {
        None
    }

    fn as_vehicle(&self) -> Option<&dyn Vehicle> {
        None
    }
}

/// Concrete view of a player object.
pub trait Player: BaseObject {
    fn id(&self) -> EntityId;
}

/// Concrete view of a vehicle object.
pub trait Vehicle: BaseObject {
    fn id(&self) -> EntityId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_map_to_variants() {
        assert_eq!(BaseObjectType::from_raw(0), BaseObjectType::Player);
        assert_eq!(BaseObjectType::from_raw(1), BaseObjectType::Vehicle);
        assert_eq!(BaseObjectType::from_raw(7), BaseObjectType::Other(7));
    }

    #[test]
    fn is_known_only_for_player_and_vehicle() {
        assert!(BaseObjectType::Player.is_known());
        assert!(BaseObjectType::Vehicle.is_known());
        assert!(!BaseObjectType::Other(3).is_known());
    }

    #[test]
    fn display_names() {
        assert_eq!(BaseObjectType::Player.to_string(), "player");
        assert_eq!(BaseObjectType::Other(12).to_string(), "other(12)");
    }
}
