//! Event-translation and delegate-dispatch bridge.
//!
//! Sits between a native host and a hosted script runtime. The host feeds
//! events, ticks and object notifications into a [`ResourceBridge`]; the
//! bridge narrows object handles, marshals argument lists, and invokes the
//! single delegate the hosted unit registered for each kind.
//!
//! Everything here is single-threaded. The bridge holds `Rc` and `Cell`
//! state, so it is neither `Send` nor `Sync`, and every entry point takes
//! `&self` so delegates may call back into the bridge reentrantly.

mod config;
mod delegates;
mod dispatcher;
mod error;
mod lifecycle;
pub mod logging;
mod marshal;
mod resolver;
mod runtime;
mod scope;

pub use config::{BridgeConfig, LogConfig, UnitConfig};
pub use delegates::{DelegateKind, DelegateTable};
pub use dispatcher::EventDispatcher;
pub use error::BridgeError;
pub use lifecycle::{ResourceBridge, UnitState};
pub use marshal::{Marshaled, marshal};
pub use resolver::{Narrowed, ObjectRef, narrow, narrow_known, narrow_object};
pub use runtime::{HostResource, HostedRuntime, UnitContext};
pub use scope::{ReentrancyScope, ScopeCounter};
