//! Cache and store error definitions.
//!
//! This module defines every failure the library reports. It provides:
//! 1. **Configuration errors:** Invalid capacity/way combinations and missing collaborators.
//! 2. **Operation errors:** Reserved keys, unresolvable entries, and misbehaving policies.
//! 3. **Store errors:** An opaque wrapper over whatever the backing store signals.

use thiserror::Error;

/// Invalid construction parameters.
///
/// Raised synchronously by `CacheBuilder::build` and `Cache::new`; no cache is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The builder was never given a backing store.
    #[error("no backing store was supplied")]
    MissingStore,

    /// The builder was never given a replacement policy.
    #[error("no replacement policy was supplied")]
    MissingPolicy,

    /// Requested capacity was zero.
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,

    /// Requested way-count was zero.
    #[error("way count must be at least 1")]
    ZeroWays,

    /// More sets were requested than the cache has lines.
    #[error("way count {ways} exceeds capacity {capacity}")]
    TooManyWays {
        /// Requested number of sets.
        ways: usize,
        /// Requested total capacity.
        capacity: usize,
    },

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// Failure reported by a backing store.
///
/// The cache never inspects the cause; it only carries it back to the caller.
#[derive(Error, Debug)]
#[error("backing store failure: {source}")]
pub struct StoreError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl StoreError {
    /// Wraps any error raised by a store implementation.
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            source: source.into(),
        }
    }

    /// Returns the underlying store error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

/// Errors returned by cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Construction parameters were rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The key equals the configured reserved key and cannot be stored.
    #[error("key uses the reserved value and cannot be cached")]
    KeyReserved,

    /// The key is neither cached nor resolvable under the active consistency mode.
    #[error("entry not found")]
    EntryNotFound,

    /// The replacement policy chose a line outside the set.
    #[error("replacement policy returned offset {offset} for a set of {lines} lines")]
    VictimOutOfRange {
        /// Offset returned by the policy.
        offset: usize,
        /// Number of lines in the set.
        lines: usize,
    },

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CacheError {
    /// Returns `true` for the `EntryNotFound` variant.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::EntryNotFound)
    }
}

/// Result type alias for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Result type alias for backing store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
