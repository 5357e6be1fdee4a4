//! Most Recently Used (MRU) Replacement Policy.
//!
//! Evicts the key read or written last in the full set. Useful when a caller
//! scans the same key sequence repeatedly and the sequence does not fit in a
//! set: the newest key is then the one whose next use lies furthest away.

use super::{ReplacementPolicy, SetView};

/// MRU policy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MruPolicy;

impl<K, V> ReplacementPolicy<K, V> for MruPolicy {
    /// Returns the offset at the back of the set's history (most recently used).
    fn replacement_index(&mut self, view: &SetView<'_, K, V>) -> usize {
        view.most_recent().unwrap_or(0)
    }
}
