//! Cache configuration.
//!
//! This module defines the serializable description of a cache. It provides:
//! 1. **Defaults:** Baseline geometry and consistency mode.
//! 2. **Structures:** `CacheConfig`, consumed by `CacheBuilder::config` and `Cache::from_config`.
//! 3. **Enums:** Replacement policy selection.
//!
//! Configuration is usually loaded from JSON; `CacheConfig::default()` is a usable
//! write-back LRU cache.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants.
pub(crate) mod defaults {
    /// Default total capacity in lines.
    pub const CAPACITY: usize = 64;

    /// Default number of sets.
    pub const WAYS: usize = 4;

    /// Write-back is on unless disabled.
    pub const WRITE_BACK: bool = true;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which line to evict
/// when a key must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyKind {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line that was accessed least recently.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// Most Recently Used replacement policy.
    ///
    /// Evicts the line that was accessed most recently.
    /// Effective for cyclic access patterns larger than the cache.
    #[serde(alias = "Mru", alias = "mru")]
    Mru,
    /// First In First Out replacement policy.
    ///
    /// Evicts lines of a set in round-robin order.
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Random replacement policy.
    ///
    /// Evicts a randomly selected line from the set.
    #[serde(alias = "Random", alias = "random")]
    Random,
}

/// Complete description of one cache instance.
///
/// # Examples
///
/// ```
/// use nway_cache::config::{CacheConfig, PolicyKind};
///
/// let json = r#"{ "capacity": 8, "ways": 2, "write_back": false, "policy": "Mru" }"#;
/// let config = CacheConfig::from_json(json).unwrap();
/// assert_eq!(config.capacity, 8);
/// assert_eq!(config.policy, PolicyKind::Mru);
/// assert_eq!(config.seed, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Requested capacity in lines; rounded up to a multiple of `ways`.
    #[serde(default = "CacheConfig::default_capacity")]
    pub capacity: usize,

    /// Number of sets the lines are partitioned into.
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Flush dirty evictions to the backing store and refill misses from it.
    #[serde(default = "CacheConfig::default_write_back")]
    pub write_back: bool,

    /// Victim selection algorithm.
    #[serde(default)]
    pub policy: PolicyKind,

    /// Seed for `PolicyKind::Random`.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CacheConfig {
    fn default_capacity() -> usize {
        defaults::CAPACITY
    }

    fn default_ways() -> usize {
        defaults::WAYS
    }

    fn default_write_back() -> bool {
        defaults::WRITE_BACK
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or unknown policy names.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parses a JSON document from a reader.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if reading fails or the document is malformed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        serde_json::from_reader(reader).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Checks the geometry without building a cache.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` that `CacheBuilder::build` would report for this geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_geometry(self.capacity, self.ways)
    }

    /// Lines per set after rounding: `ceil(capacity / ways)`.
    pub fn lines_per_set(&self) -> usize {
        self.capacity.div_ceil(self.ways.max(1))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::CAPACITY,
            ways: defaults::WAYS,
            write_back: defaults::WRITE_BACK,
            policy: PolicyKind::default(),
            seed: None,
        }
    }
}

/// Validates a capacity/way-count pair.
pub(crate) fn validate_geometry(capacity: usize, ways: usize) -> Result<(), ConfigError> {
    if capacity < 1 {
        return Err(ConfigError::ZeroCapacity);
    }
    if ways < 1 {
        return Err(ConfigError::ZeroWays);
    }
    if ways > capacity {
        return Err(ConfigError::TooManyWays { ways, capacity });
    }
    Ok(())
}
