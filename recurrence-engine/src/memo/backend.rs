//! Storage backends for the memo cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use dashmap::DashMap;

use crate::params::RecurrenceParameters;

/// A thread-safe storage backend for the memo cache.
///
/// # Contract
///
/// - `get_or_insert` is idempotent: the first value stored for a key wins and
///   later inserts for the same key return the stored value unchanged
/// - entries are never removed
pub trait MemoBackend<V>: Send + Sync {
    /// Returns the cached value for `key`, if any.
    fn get(&self, key: &RecurrenceParameters) -> Option<V>;

    /// Stores `value` under `key` unless an entry already exists, and returns
    /// the entry's value.
    fn get_or_insert(&self, key: RecurrenceParameters, value: V) -> V;

    /// Number of cached entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A DashMap-based backend.
///
/// Sharded locking keeps contention low when many threads share one engine.
#[derive(Debug)]
pub struct DashMapBackend<V> {
    data: DashMap<RecurrenceParameters, V>,
}

impl<V> DashMapBackend<V> {
    /// Creates a new empty DashMapBackend.
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Creates a new DashMapBackend with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: DashMap::with_capacity(capacity),
        }
    }
}

impl<V> Default for DashMapBackend<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy + Send + Sync> MemoBackend<V> for DashMapBackend<V> {
    fn get(&self, key: &RecurrenceParameters) -> Option<V> {
        self.data.get(key).map(|entry| *entry)
    }

    fn get_or_insert(&self, key: RecurrenceParameters, value: V) -> V {
        *self.data.entry(key).or_insert(value)
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

/// A `RwLock<HashMap>` backend, suited to read-heavy workloads.
///
/// A poisoned lock is recovered: every insert is a single map operation, so
/// the map never holds a half-written entry.
#[derive(Debug)]
pub struct RwLockHashMapBackend<V> {
    data: RwLock<HashMap<RecurrenceParameters, V>>,
}

impl<V> RwLockHashMapBackend<V> {
    /// Creates a new empty RwLockHashMapBackend.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a new RwLockHashMapBackend with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }
}

impl<V> Default for RwLockHashMapBackend<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy + Send + Sync> MemoBackend<V> for RwLockHashMapBackend<V> {
    fn get(&self, key: &RecurrenceParameters) -> Option<V> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.get(key).copied()
    }

    fn get_or_insert(&self, key: RecurrenceParameters, value: V) -> V {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *data.entry(key).or_insert(value)
    }

    fn len(&self) -> usize {
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
