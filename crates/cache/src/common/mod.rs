//! Common types shared by the cache, the stores, and the optimizer.
//!
//! This module provides:
//! 1. **Errors:** Configuration, cache, and backing-store failures.
//! 2. **Hashing:** Deterministic key hashers used for set selection.

/// Error types for construction, cache operations, and store access.
pub mod error;

/// Key hashers used to map keys onto sets.
pub mod hash;

pub use error::{CacheError, CacheResult, ConfigError, StoreError, StoreResult};
pub use hash::{DefaultKeyHasher, IdentityHasher, IdentityKeyHasher};
