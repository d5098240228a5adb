//! Reentrancy scopes around calls that may re-enter the bridge.
//!
//! While at least one scope is held, native calls from the hosted runtime are
//! permitted to re-enter the bridge synchronously. Scopes nest: each acquire
//! adds one to the depth and each release takes one away, so the counter
//! stays active until every guard is gone, in whatever order they drop.
//! Release happens on drop, which covers early returns and unwinding.

use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;

/// Shared depth counter; cloning shares the same count.
#[derive(Debug, Clone, Default)]
pub struct ScopeCounter {
    depth: Rc<Cell<u32>>,
}

impl ScopeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires a scope. The returned guard releases it when dropped.
    #[must_use = "the scope is released as soon as the guard is dropped"]
    pub fn enter(&self) -> ReentrancyScope {
        let depth = self.depth.get() + 1;
        self.depth.set(depth);
        trace!(depth, "Reentrancy scope entered");
        ReentrancyScope {
            counter: self.clone(),
            depth,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth.get()
    }

    /// Whether native calls may currently re-enter the bridge.
    pub fn is_active(&self) -> bool {
        self.depth.get() > 0
    }
}

/// Guard for one acquired scope.
#[derive(Debug)]
pub struct ReentrancyScope {
    counter: ScopeCounter,
    depth: u32,
}

impl ReentrancyScope {
    /// Depth at which this scope was entered (1 for the outermost).
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Drop for ReentrancyScope {
    fn drop(&mut self) {
        let depth = self.counter.depth.get().saturating_sub(1);
        self.counter.depth.set(depth);
        trace!(depth, "Reentrancy scope released");
    }
}
