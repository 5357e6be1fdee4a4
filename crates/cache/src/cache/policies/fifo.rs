//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts lines in a fixed rotation per set, regardless of how recently they were
//! accessed. It operates as a circular buffer (Round-Robin) for each set: every eviction
//! advances that set's pointer to the next line.
//!
//! Unlike LRU and MRU this policy owns state, so it listens to `refresh`: a `Clear` or
//! `DeepClear` empties the cache and rewinds every pointer.
//!
//! # Performance
//!
//! - **Time Complexity:** `replacement_index()` is O(1)
//! - **Space Complexity:** O(S) where S is the number of sets
//! - **Best Case:** Scans where every line is touched once
//! - **Worst Case:** Hot keys sharing a set with streaming keys; age, not use, decides

use super::{ReplacementPolicy, SetView};
use crate::cache::operation::Operation;

/// FIFO policy state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FifoPolicy {
    /// Next line to evict in each set. Grows on demand as sets are first filled.
    next_line: Vec<usize>,
}

impl FifoPolicy {
    /// Creates a FIFO policy with every pointer at line 0.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, V> ReplacementPolicy<K, V> for FifoPolicy {
    /// Returns the set's round-robin pointer and advances it.
    fn replacement_index(&mut self, view: &SetView<'_, K, V>) -> usize {
        let set = view.set();
        if self.next_line.len() <= set {
            self.next_line.resize(set + 1, 0);
        }
        let lines = view.line_count().max(1);
        let victim = self.next_line[set] % lines;
        self.next_line[set] = (victim + 1) % lines;
        victim
    }

    fn refresh(&mut self, op: Operation) {
        if matches!(op, Operation::Clear | Operation::DeepClear) {
            self.next_line.clear();
        }
    }
}
