//! Table of live engine handles.
//!
//! Handles given to C are opaque ids, never addresses. Ids are not reused, so
//! a null, foreign or already-destroyed handle is rejected instead of
//! dereferenced. Each call holds its own reference to the engine, so a
//! concurrent destroy only frees it once the last in-flight call returns.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use sheetforge_engine::Engine;

use crate::types::SfEngine;

static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(1);

fn live() -> &'static DashMap<usize, Arc<Engine>> {
    static LIVE: OnceLock<DashMap<usize, Arc<Engine>>> = OnceLock::new();
    LIVE.get_or_init(DashMap::new)
}

/// Hand an engine to C.
pub(crate) fn register(engine: Engine) -> *mut SfEngine {
    let id = NEXT_HANDLE.fetch_add(1, Ordering::Relaxed);
    live().insert(id, Arc::new(engine));
    std::ptr::without_provenance_mut(id)
}

/// Take an engine back from C. `None` if the handle is not live.
pub(crate) fn release(handle: *mut SfEngine) -> Option<Arc<Engine>> {
    live()
        .remove(&handle.addr())
        .map(|(_, engine)| engine)
}

/// Engine behind a handle. `None` if the handle is not live.
pub(crate) fn resolve(handle: *const SfEngine) -> Option<Arc<Engine>> {
    live()
        .get(&handle.addr())
        .map(|entry| Arc::clone(entry.value()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_resolve_release() {
        let handle = register(Engine::new());
        assert!(resolve(handle).is_some());

        assert!(release(handle).is_some());
        assert!(resolve(handle).is_none());
    }

    #[test]
    fn double_release_is_refused() {
        let handle = register(Engine::new());
        assert!(release(handle).is_some());
        assert!(release(handle).is_none());
    }

    #[test]
    fn handles_are_never_reused() {
        let first = register(Engine::new());
        release(first);
        let second = register(Engine::new());
        assert_ne!(first, second);
        assert!(resolve(first).is_none());
        release(second);
    }

    #[test]
    fn null_and_foreign_handles_are_not_live() {
        assert!(resolve(std::ptr::null()).is_none());
        assert!(release(std::ptr::null_mut()).is_none());
        assert!(resolve(std::ptr::without_provenance(usize::MAX)).is_none());
    }
}
