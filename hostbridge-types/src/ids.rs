//! Identifier types for host-owned entities.
//!
//! The host assigns each networked entity a 16-bit id that stays stable for
//! the entity's lifetime. Ids are reused by the host once an entity is removed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host-assigned identifier of a player or vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u16);

impl EntityId {
    /// Wraps a raw host id.
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw host id.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for EntityId {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<EntityId> for u16 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
