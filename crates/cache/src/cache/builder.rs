//! Cache construction.
//!
//! This module assembles a `Cache` from its parts. It performs:
//! 1. **Collaborators:** Takes the backing store and replacement policy (owned, borrowed, or boxed).
//! 2. **Geometry:** Validates capacity and way-count, then rounds capacity up to whole sets.
//! 3. **Keys:** Optionally reserves one key value and selects the hasher used for set mapping.

use std::marker::PhantomData;

use tracing::debug;

use super::Cache;
use super::policies::ReplacementPolicy;
use crate::common::error::ConfigError;
use crate::common::hash::DefaultKeyHasher;
use crate::config::{self, CacheConfig, defaults};
use crate::stats::CacheStats;
use crate::store::BackingStore;

/// Step-by-step constructor for [`Cache`].
///
/// Geometry and consistency mode default to `CacheConfig::default()`. The store and policy have
/// no defaults; `build` fails if either was never supplied.
///
/// # Examples
///
/// ```
/// use nway_cache::cache::policies::LruPolicy;
/// use nway_cache::{Cache, CacheBuilder, MemoryStore};
///
/// let mut cache: Cache<u32, String, _, _> = CacheBuilder::new()
///     .store(MemoryStore::<u32, String>::new())
///     .policy(LruPolicy)
///     .capacity(8)
///     .ways(2)
///     .write_back(true)
///     .build()
///     .unwrap();
///
/// cache.put(1, "one".to_string()).unwrap();
/// assert_eq!(cache.get(&1).unwrap(), "one");
/// ```
pub struct CacheBuilder<K, V, S, P, H = DefaultKeyHasher> {
    store: Option<S>,
    policy: Option<P>,
    capacity: usize,
    ways: usize,
    write_back: bool,
    reserved: Option<K>,
    hasher: H,
    _values: PhantomData<fn() -> V>,
}

impl<K, V, S, P> CacheBuilder<K, V, S, P> {
    /// Creates a builder with default geometry and no collaborators.
    pub fn new() -> Self {
        Self {
            store: None,
            policy: None,
            capacity: defaults::CAPACITY,
            ways: defaults::WAYS,
            write_back: defaults::WRITE_BACK,
            reserved: None,
            hasher: DefaultKeyHasher::default(),
            _values: PhantomData,
        }
    }
}

impl<K, V, S, P> Default for CacheBuilder<K, V, S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S, P, H> CacheBuilder<K, V, S, P, H> {
    /// Sets the backing store.
    #[must_use]
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the replacement policy.
    #[must_use]
    pub fn policy(mut self, policy: P) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sets the requested capacity in lines.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of sets.
    #[must_use]
    pub fn ways(mut self, ways: usize) -> Self {
        self.ways = ways;
        self
    }

    /// Selects write-back (`true`) or write-through (`false`) consistency.
    #[must_use]
    pub fn write_back(mut self, write_back: bool) -> Self {
        self.write_back = write_back;
        self
    }

    /// Forbids `key` from ever being stored; operations on it fail with `KeyReserved`.
    #[must_use]
    pub fn reserved_key(mut self, key: K) -> Self {
        self.reserved = Some(key);
        self
    }

    /// Copies capacity, way-count, and consistency mode from a configuration.
    #[must_use]
    pub fn config(mut self, config: &CacheConfig) -> Self {
        self.capacity = config.capacity;
        self.ways = config.ways;
        self.write_back = config.write_back;
        self
    }

    /// Replaces the hasher that maps keys onto sets.
    pub fn hasher<H2>(self, hasher: H2) -> CacheBuilder<K, V, S, P, H2> {
        CacheBuilder {
            store: self.store,
            policy: self.policy,
            capacity: self.capacity,
            ways: self.ways,
            write_back: self.write_back,
            reserved: self.reserved,
            hasher,
            _values: PhantomData,
        }
    }

    /// Validates the parameters and allocates the cache.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the store or policy is missing, if capacity or way-count is
    /// zero, or if there are more ways than lines.
    pub fn build(self) -> Result<Cache<K, V, S, P, H>, ConfigError>
    where
        S: BackingStore<K, V>,
        P: ReplacementPolicy<K, V>,
    {
        let store = self.store.ok_or(ConfigError::MissingStore)?;
        let policy = self.policy.ok_or(ConfigError::MissingPolicy)?;
        config::validate_geometry(self.capacity, self.ways)?;

        let line_number = self.capacity.div_ceil(self.ways);
        let cache_size = line_number * self.ways;
        debug!(
            requested = self.capacity,
            cache_size,
            sets = self.ways,
            lines_per_set = line_number,
            write_back = self.write_back,
            "allocating cache"
        );

        Ok(Cache {
            lines: std::iter::repeat_with(|| None).take(cache_size).collect(),
            history: vec![Vec::with_capacity(line_number); self.ways],
            line_number,
            n_way: self.ways,
            write_back: self.write_back,
            reserved: self.reserved,
            hasher: self.hasher,
            store,
            policy,
            stats: CacheStats::default(),
        })
    }
}

impl<K, V, S, P, H> std::fmt::Debug for CacheBuilder<K, V, S, P, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("has_store", &self.store.is_some())
            .field("has_policy", &self.policy.is_some())
            .field("capacity", &self.capacity)
            .field("ways", &self.ways)
            .field("write_back", &self.write_back)
            .field("has_reserved_key", &self.reserved.is_some())
            .finish_non_exhaustive()
    }
}
