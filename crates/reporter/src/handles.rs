//! Opaque handles for entities the client can only refer to by number.
//!
//! A [`HandleRegistry`] hands out one handle per entity for the lifetime of
//! a debugging session. Handles are positive so that `0` keeps its protocol
//! meaning of "no reference".

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// Largest handle a registry hands out.
///
/// Many DAP clients parse `sourceReference` and breakpoint ids as `i32`.
pub const MAX_HANDLE: i64 = i32::MAX as i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(i64);

impl Handle {
    /// Wrap a number received from the client. Returns `None` for non-positive values.
    pub fn from_raw(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Entries<K> {
    next: i64,
    by_entity: HashMap<K, Handle>,
    by_handle: HashMap<Handle, K>,
}

/// Thread-safe two-way map between entities and handles.
///
/// All operations take the lock for the duration of one map update and never
/// across an `.await`, so concurrent conversions registering the same entity
/// always converge on one handle.
pub struct HandleRegistry<K> {
    base: i64,
    entries: Mutex<Entries<K>>,
}

impl<K> HandleRegistry<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_base(0)
    }

    /// Handles start at `base + 1`. `base` is clamped to `0..=MAX_HANDLE`.
    ///
    /// Distinct bases keep handles from different registries apart when they
    /// share a number space on the wire.
    pub fn with_base(base: i64) -> Self {
        let base = base.clamp(0, MAX_HANDLE);
        Self {
            base,
            entries: Mutex::new(Entries {
                next: base + 1,
                by_entity: HashMap::new(),
                by_handle: HashMap::new(),
            }),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Entries<K>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The handle for `entity`, minting one the first time it is seen.
    ///
    /// Returns `None` for a new entity once every handle up to
    /// [`MAX_HANDLE`] has been issued.
    pub fn register(&self, entity: &K) -> Option<Handle> {
        let mut entries = self.entries();
        if let Some(handle) = entries.by_entity.get(entity) {
            return Some(*handle);
        }

        if entries.next > MAX_HANDLE {
            tracing::warn!(base = self.base, "handle space exhausted");
            return None;
        }
        let handle = Handle(entries.next);
        entries.next += 1;
        entries.by_entity.insert(entity.clone(), handle);
        entries.by_handle.insert(handle, entity.clone());
        tracing::trace!(%handle, "registered new handle");
        Some(handle)
    }

    /// The handle for `entity` if one was already minted.
    pub fn lookup(&self, entity: &K) -> Option<Handle> {
        self.entries().by_entity.get(entity).copied()
    }

    pub fn resolve(&self, handle: Handle) -> Option<K> {
        self.entries().by_handle.get(&handle).cloned()
    }

    /// Forget every entity.
    ///
    /// The counter keeps running, so a handle issued before the clear is
    /// never reissued for a different entity.
    pub fn clear(&self) {
        let mut entries = self.entries();
        entries.by_entity.clear();
        entries.by_handle.clear();
    }

    pub fn len(&self) -> usize {
        self.entries().by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn base(&self) -> i64 {
        self.base
    }
}

impl<K> Default for HandleRegistry<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> std::fmt::Debug for HandleRegistry<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleRegistry")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
