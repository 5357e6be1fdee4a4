//! Backing store boundary.
//!
//! The cache consults a backing store only in write-back mode (misses and dirty evictions) and
//! on `deep_clear`. Any persistence target can sit behind this trait: a map, a file, or a
//! network service. Calls are synchronous and a failure aborts the triggering cache operation.

/// In-memory reference store with fetch accounting.
pub mod memory;

pub use memory::MemoryStore;

use crate::common::error::StoreResult;

/// Key/value persistence target behind the cache.
pub trait BackingStore<K, V> {
    /// Writes `value` under `key`, replacing any previous value.
    fn put(&mut self, key: K, value: V) -> StoreResult<()>;

    /// Reads the value stored under `key`, or `None` if the store lacks it.
    fn get(&mut self, key: &K) -> StoreResult<Option<V>>;

    /// Deletes `key`, returning the value it held.
    fn remove(&mut self, key: &K) -> StoreResult<Option<V>>;

    /// Discards every entry.
    fn clear(&mut self) -> StoreResult<()>;
}

impl<K, V, S: BackingStore<K, V> + ?Sized> BackingStore<K, V> for &mut S {
    fn put(&mut self, key: K, value: V) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn get(&mut self, key: &K) -> StoreResult<Option<V>> {
        (**self).get(key)
    }

    fn remove(&mut self, key: &K) -> StoreResult<Option<V>> {
        (**self).remove(key)
    }

    fn clear(&mut self) -> StoreResult<()> {
        (**self).clear()
    }
}

impl<K, V, S: BackingStore<K, V> + ?Sized> BackingStore<K, V> for Box<S> {
    fn put(&mut self, key: K, value: V) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn get(&mut self, key: &K) -> StoreResult<Option<V>> {
        (**self).get(key)
    }

    fn remove(&mut self, key: &K) -> StoreResult<Option<V>> {
        (**self).remove(key)
    }

    fn clear(&mut self) -> StoreResult<()> {
        (**self).clear()
    }
}
