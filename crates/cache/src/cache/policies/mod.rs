//! Cache Replacement Policies.
//!
//! Implements the algorithms that pick a victim line when a key lands in a full set.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Mru`: Most Recently Used.
//! - `Fifo`: First-In, First-Out (round-robin per set).
//! - `Random`: Uniform random selection from a seedable generator.
//!
//! Any other type implementing [`ReplacementPolicy`] can be plugged into a cache.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

/// Most Recently Used replacement policy.
pub mod mru;

/// Random replacement policy.
pub mod random;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use mru::MruPolicy;
pub use random::RandomPolicy;

use super::line::Line;
use super::operation::Operation;
use crate::config::PolicyKind;

/// Read-only view of the cache handed to a policy when a set is full.
///
/// Offsets are always set-relative: `0` is the first line of the set being filled, and the
/// cache adds the set's base slot to whatever offset the policy returns.
#[derive(Debug)]
pub struct SetView<'a, K, V> {
    set: usize,
    line_count: usize,
    histories: &'a [Vec<usize>],
    lines: &'a [Option<Line<K, V>>],
}

impl<'a, K, V> SetView<'a, K, V> {
    pub(crate) const fn new(
        set: usize,
        line_count: usize,
        histories: &'a [Vec<usize>],
        lines: &'a [Option<Line<K, V>>],
    ) -> Self {
        Self {
            set,
            line_count,
            histories,
            lines,
        }
    }

    /// Index of the set being filled.
    pub const fn set(&self) -> usize {
        self.set
    }

    /// Number of lines in every set.
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// Access history of this set, least recently used first.
    pub fn history(&self) -> &'a [usize] {
        self.histories.get(self.set).map(Vec::as_slice).unwrap_or_default()
    }

    /// Access histories of every set.
    pub const fn histories(&self) -> &'a [Vec<usize>] {
        self.histories
    }

    /// Lines of this set, in offset order.
    pub fn lines(&self) -> &'a [Option<Line<K, V>>] {
        let base = self.set * self.line_count;
        self.lines.get(base..base + self.line_count).unwrap_or(&[])
    }

    /// Every line in the cache, in slot order.
    pub const fn all_lines(&self) -> &'a [Option<Line<K, V>>] {
        self.lines
    }

    /// The line at `offset` within this set, if occupied.
    pub fn line(&self, offset: usize) -> Option<&'a Line<K, V>> {
        self.lines().get(offset).and_then(Option::as_ref)
    }

    /// Offset of the least recently used line, if the set has any history.
    pub fn least_recent(&self) -> Option<usize> {
        self.history().first().copied()
    }

    /// Offset of the most recently used line, if the set has any history.
    pub fn most_recent(&self) -> Option<usize> {
        self.history().last().copied()
    }
}

/// Trait for cache replacement policies.
///
/// Defines victim selection for full sets and an optional hook that observes every cache
/// operation.
pub trait ReplacementPolicy<K, V> {
    /// Selects the line to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `view` - The set being filled plus read access to the whole cache.
    ///
    /// # Returns
    ///
    /// A set-relative offset in `0..view.line_count()`. Policies must return a valid offset
    /// even when the set has no recorded history; `0` is the conventional fallback.
    fn replacement_index(&mut self, view: &SetView<'_, K, V>) -> usize;

    /// Observes a completed cache operation. Stateless policies ignore it.
    fn refresh(&mut self, _op: Operation) {}
}

impl<K, V, P: ReplacementPolicy<K, V> + ?Sized> ReplacementPolicy<K, V> for &mut P {
    fn replacement_index(&mut self, view: &SetView<'_, K, V>) -> usize {
        (**self).replacement_index(view)
    }

    fn refresh(&mut self, op: Operation) {
        (**self).refresh(op);
    }
}

impl<K, V, P: ReplacementPolicy<K, V> + ?Sized> ReplacementPolicy<K, V> for Box<P> {
    fn replacement_index(&mut self, view: &SetView<'_, K, V>) -> usize {
        (**self).replacement_index(view)
    }

    fn refresh(&mut self, op: Operation) {
        (**self).refresh(op);
    }
}

/// Instantiates the policy named by a configuration value.
///
/// `seed` only affects `PolicyKind::Random`; without one the generator is seeded from the OS.
pub fn from_kind<K, V>(kind: PolicyKind, seed: Option<u64>) -> Box<dyn ReplacementPolicy<K, V>> {
    match kind {
        PolicyKind::Lru => Box::new(LruPolicy),
        PolicyKind::Mru => Box::new(MruPolicy),
        PolicyKind::Fifo => Box::new(FifoPolicy::new()),
        PolicyKind::Random => Box::new(seed.map_or_else(RandomPolicy::new, RandomPolicy::with_seed)),
    }
}
