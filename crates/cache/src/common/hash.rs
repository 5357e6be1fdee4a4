//! Key hashing for set selection.
//!
//! The cache reduces `hash(key) mod cache_size` to pick a set, so the hasher decides how keys
//! spread across sets. Both hashers here are deterministic: the same key always lands in the
//! same set, across cache instances and across runs.

use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasherDefault, Hasher};

/// SipHash with fixed keys. Used when no hasher is configured.
pub type DefaultKeyHasher = BuildHasherDefault<DefaultHasher>;

/// Builds [`IdentityHasher`] instances.
pub type IdentityKeyHasher = BuildHasherDefault<IdentityHasher>;

/// Multiplier used to fold successive writes together.
const FOLD: u64 = 0x0000_0100_0000_01b3;

/// Hasher that returns a single integer key unchanged.
///
/// Integer keys map to `key mod cache_size`, so consecutive keys fill consecutive lines. This is
/// how a direct-mapped hardware cache indexes addresses. Keys that write more than one word
/// (strings, tuples) are folded FNV-style; only the first word passes through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher {
    state: u64,
}

impl IdentityHasher {
    #[inline]
    fn fold(&mut self, word: u64) {
        self.state = self.state.wrapping_mul(FOLD) ^ word;
    }
}

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.fold(u64::from(b));
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.fold(u64::from(i));
    }

    fn write_u16(&mut self, i: u16) {
        self.fold(u64::from(i));
    }

    fn write_u32(&mut self, i: u32) {
        self.fold(u64::from(i));
    }

    fn write_u64(&mut self, i: u64) {
        self.fold(i);
    }

    fn write_usize(&mut self, i: usize) {
        self.fold(i as u64);
    }

    // Negative keys keep their magnitude, mirroring `abs(hash)`.
    fn write_i32(&mut self, i: i32) {
        self.fold(u64::from(i.unsigned_abs()));
    }

    fn write_i64(&mut self, i: i64) {
        self.fold(i.unsigned_abs());
    }
}
