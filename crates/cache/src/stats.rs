//! Cache statistics collection and reporting.
//!
//! This module tracks how a cache instance behaved over its lifetime. It provides:
//! 1. **Reads:** Hits and misses on `get`, and the derived hit/miss rates.
//! 2. **Replacement:** Evictions from full sets.
//! 3. **Store traffic:** Dirty lines written back and values fetched on write-back misses.

use std::fmt;

use serde::Serialize;

/// Counters for a single cache instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// `get` calls answered from a cache line.
    pub hits: u64,
    /// `get` calls that found no line for the key.
    pub misses: u64,
    /// Lines replaced because their set was full.
    pub evictions: u64,
    /// Dirty lines written to the backing store.
    pub write_backs: u64,
    /// Reads issued to the backing store after a miss.
    pub store_fetches: u64,
}

impl CacheStats {
    /// Total `get` calls.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of reads answered from the cache, `0.0` before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of reads not answered from the cache, `0.0` before any read.
    pub fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "CACHE STATISTICS")?;
        writeln!(f, "  cache.accesses         {}", self.accesses())?;
        writeln!(f, "  cache.hits             {}", self.hits)?;
        writeln!(f, "  cache.misses           {}", self.misses)?;
        writeln!(f, "  cache.hit_rate         {:.2}%", self.hit_rate() * 100.0)?;
        writeln!(f, "  cache.evictions        {}", self.evictions)?;
        writeln!(f, "  store.write_backs      {}", self.write_backs)?;
        writeln!(f, "  store.fetches          {}", self.store_fetches)?;
        write!(f, "----------------------------------------------------------")
    }
}
