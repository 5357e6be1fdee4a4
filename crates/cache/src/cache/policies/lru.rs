//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has gone unaccessed the longest. It keeps no state of its
//! own: the cache maintains a recency list per set (front = LRU, back = MRU), and the victim is
//! simply the front of that list.
//!
//! # Performance
//!
//! - **Time Complexity:** `replacement_index()` is O(1); the cache pays O(L) per access to
//!   reorder the history, where L is the number of lines per set
//! - **Space Complexity:** O(1) beyond the shared history
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Cyclic scans larger than a set (thrashing)

use super::{ReplacementPolicy, SetView};

/// LRU policy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruPolicy;

impl<K, V> ReplacementPolicy<K, V> for LruPolicy {
    /// Returns the offset at the front of the set's history (least recently used).
    fn replacement_index(&mut self, view: &SetView<'_, K, V>) -> usize {
        view.least_recent().unwrap_or(0)
    }
}
