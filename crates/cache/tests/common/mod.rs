//! Shared constructors and mocks.

use nway_cache::cache::policies::{LruPolicy, ReplacementPolicy};
use nway_cache::common::IdentityKeyHasher;
use nway_cache::{Cache, CacheBuilder, MemoryStore};


/// Cache over `u64` keys whose set index is `(key mod capacity) / lines_per_set`.
pub type IdentityCache<P> = Cache<u64, u64, MemoryStore<u64, u64>, P, IdentityKeyHasher>;

/// Builds a cache with identity hashing, so tests can choose which set each key lands in.
pub fn identity_cache<P>(capacity: usize, ways: usize, write_back: bool, policy: P) -> IdentityCache<P>
where
    P: ReplacementPolicy<u64, u64>,
{
    CacheBuilder::new()
        .store(MemoryStore::new())
        .policy(policy)
        .capacity(capacity)
        .ways(ways)
        .write_back(write_back)
        .hasher(IdentityKeyHasher::default())
        .build()
        .unwrap()
}

/// LRU cache with identity hashing.
pub fn lru_cache(capacity: usize, ways: usize, write_back: bool) -> IdentityCache<LruPolicy> {
    identity_cache(capacity, ways, write_back, LruPolicy)
}

/// Keys currently cached, sorted.
pub fn cached_keys<P>(cache: &IdentityCache<P>) -> Vec<u64> {
    let mut keys: Vec<u64> = cache.iter().map(|(k, _)| *k).collect();
    keys.sort_unstable();
    keys
}
