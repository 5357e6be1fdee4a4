//! HashMap-backed store.
//!
//! Every `get` is counted, hit or not, so the optimizer can measure how often a cache had to
//! fall through to its store.

use std::collections::HashMap;
use std::hash::Hash;

use super::BackingStore;
use crate::common::error::StoreResult;

/// In-memory backing store.
#[derive(Debug, Clone)]
pub struct MemoryStore<K, V> {
    entries: HashMap<K, V>,
    fetches: u64,
}

impl<K, V> Default for MemoryStore<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            fetches: 0,
        }
    }
}

impl<K: Eq + Hash, V> MemoryStore<K, V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls served so far.
    pub const fn fetches(&self) -> u64 {
        self.fetches
    }

    /// Zeroes the fetch counter without touching the entries.
    pub fn reset_fetches(&mut self) {
        self.fetches = 0;
    }

    /// Returns `true` if `key` is stored. Does not count as a fetch.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Reads `key` without counting a fetch.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for MemoryStore<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            fetches: 0,
        }
    }
}

impl<K: Eq + Hash, V: Clone> BackingStore<K, V> for MemoryStore<K, V> {
    fn put(&mut self, key: K, value: V) -> StoreResult<()> {
        let _ = self.entries.insert(key, value);
        Ok(())
    }

    fn get(&mut self, key: &K) -> StoreResult<Option<V>> {
        self.fetches += 1;
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &K) -> StoreResult<Option<V>> {
        Ok(self.entries.remove(key))
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.entries.clear();
        Ok(())
    }
}
