//! # Module Registry
//!
//! Owns the mapping from engine-assigned identifier to module instance, and
//! the monotonic identifier counter.
//!
//! ## Identifier Discipline
//!
//! - Ids are positive, strictly increasing, and assigned once per successful
//!   registration.
//! - An id is never reused, even after its instance is removed; the counter
//!   lives as long as the composition root and is never reset by
//!   unregistration.
//! - Failed registrations consume no id — the caller draws an id only after
//!   resolution succeeded.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use crate::module::{ModuleHandle, ModuleSet};

/// Id-keyed instance storage plus the id counter.
///
/// Storage is ordered by id so batch operations iterate in assignment order,
/// which for a single discovery sweep equals document order.
pub struct ModuleRegistry {
    modules: RwLock<BTreeMap<u64, ModuleHandle>>,
    next_id: AtomicU64,
}

impl ModuleRegistry {
    /// Create an empty registry with the counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Draw the next identifier.
    ///
    /// Returns `counter + 1` and persists the increment. Never returns a
    /// previously issued value.
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Store an instance under an id drawn from [`next_id`](Self::next_id).
    pub fn insert(&self, id: u64, handle: ModuleHandle) {
        self.modules.write().insert(id, handle);
    }

    /// Look up an instance. `None` when the id is not present.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<ModuleHandle> {
        self.modules.read().get(&id).cloned()
    }

    /// Remove an instance. Removing an absent id is a no-op.
    pub fn remove(&self, id: u64) -> Option<ModuleHandle> {
        self.modules.write().remove(&id)
    }

    /// Remove every instance. The id counter is not reset.
    pub fn clear(&self) {
        let mut modules = self.modules.write();
        debug!(removed = modules.len(), "Registry cleared");
        modules.clear();
    }

    /// Ids of all stored instances, ascending.
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.modules.read().keys().copied().collect()
    }

    /// Clone the full id-to-instance mapping for a batch operation.
    #[must_use]
    pub fn snapshot(&self) -> ModuleSet {
        self.modules.read().clone()
    }

    /// Number of stored instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
