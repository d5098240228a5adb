//! Object identity narrowing.
//!
//! Resolves a base-object handle to its concrete player or vehicle view by
//! matching on the runtime tag. Two policies exist for tags without a
//! concrete view, and they are intentionally kept apart:
//!
//! - [`narrow`] (event path) keeps the object, yields no view and preserves
//!   the reported tag, so receivers can tolerate object kinds added by newer
//!   hosts.
//! - [`narrow_known`] (create/remove path) yields nothing at all, and the
//!   notification is dropped.

use hostbridge_types::{BaseObject, BaseObjectType, Player, Vehicle};

/// A concrete object view.
#[derive(Debug, Clone, Copy)]
pub enum ObjectRef<'a> {
    Player(&'a dyn Player),
    Vehicle(&'a dyn Vehicle),
}

/// Result of narrowing on the event path: an optional view plus the tag.
#[derive(Debug, Clone, Copy)]
pub struct Narrowed<'a> {
    /// The handle as the host delivered it, whether or not it narrowed.
    pub handle: &'a dyn BaseObject,
    pub object: Option<ObjectRef<'a>>,
    pub tag: BaseObjectType,
}

impl<'a> Narrowed<'a> {
    pub fn is_null(&self) -> bool {
        self.object.is_none()
    }

    pub fn player(&self) -> Option<&'a dyn Player> {
        match self.object {
            Some(ObjectRef::Player(p)) => Some(p),
            _ => None,
        }
    }

    pub fn vehicle(&self) -> Option<&'a dyn Vehicle> {
        match self.object {
            Some(ObjectRef::Vehicle(v)) => Some(v),
            _ => None,
        }
    }
}

/// Narrows `handle` according to `tag`, never dropping it.
///
/// A known tag whose cast fails also yields a null view with the tag kept.
pub fn narrow<'a>(handle: &'a dyn BaseObject, tag: BaseObjectType) -> Narrowed<'a> {
    let object = match tag {
        BaseObjectType::Player => handle.as_player().map(ObjectRef::Player),
        BaseObjectType::Vehicle => handle.as_vehicle().map(ObjectRef::Vehicle),
        BaseObjectType::Other(_) => None,
    };
    Narrowed {
        handle,
        object,
        tag,
    }
}

/// Narrows `handle` using the tag it reports.
pub fn narrow_object(handle: &dyn BaseObject) -> Narrowed<'_> {
    narrow(handle, handle.object_type())
}

/// Narrows `handle` to a concrete view, or `None` when it has none.
pub fn narrow_known(handle: &dyn BaseObject) -> Option<ObjectRef<'_>> {
    narrow_object(handle).object
}
