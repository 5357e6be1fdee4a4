//! Generic N-way set-associative cache library.
//!
//! This crate implements a fixed-capacity key/value cache organised like a hardware cache:
//! 1. **Cache:** Hash-partitioned sets of lines, dirty tracking, write-back or write-through consistency.
//! 2. **Policies:** Pluggable victim selection (LRU, MRU, Random, or any custom `ReplacementPolicy`).
//! 3. **Store:** The `BackingStore` boundary consulted on write-back misses and dirty evictions.
//! 4. **Simulation:** Trace replay and the associativity optimizer that picks the best way-count.
//! 5. **Configuration and statistics:** Serde-backed cache configuration and hit/miss counters.

/// Cache engine, builder, operations, and replacement policies.
pub mod cache;
/// Shared error types and key hashing.
pub mod common;
/// Cache configuration (defaults, policy selection, JSON loading).
pub mod config;
/// Trace replay and associativity optimization.
pub mod sim;
/// Cache hit/miss statistics.
pub mod stats;
/// Backing store trait and the in-memory reference store.
pub mod store;

/// Main cache type; construct with `Cache::new` or `CacheBuilder`.
pub use crate::cache::{Cache, CacheBuilder, Operation};
/// Error types returned by cache and store operations.
pub use crate::common::error::{CacheError, ConfigError, StoreError};
/// Root configuration type; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Backing store boundary and its in-memory implementation.
pub use crate::store::{BackingStore, MemoryStore};
