//! N-Way Set-Associative Cache.
//!
//! This module implements the cache engine. Keys hash onto one of `n_way` sets, each set holds
//! `line_number` lines, and a full set asks the configured replacement policy for a victim.
//! In write-back mode, dirty victims are flushed to the backing store and misses are refilled
//! from it; in write-through mode the store is never consulted and misses are errors.

/// Step-by-step cache construction.
pub mod builder;

/// Occupied line representation.
pub mod line;

/// Operation tags used for policy notifications and trace replay.
pub mod operation;

/// Cache replacement policy implementations (LRU, MRU, FIFO, Random).
pub mod policies;

pub use builder::CacheBuilder;
pub use line::Line;
pub use operation::Operation;

use std::fmt;
use std::hash::{BuildHasher, Hash};

use tracing::{debug, trace};

use self::policies::{ReplacementPolicy, SetView};
use crate::common::error::{CacheError, CacheResult, ConfigError};
use crate::common::hash::DefaultKeyHasher;
use crate::config::CacheConfig;
use crate::stats::CacheStats;
use crate::store::BackingStore;

/// Generic N-way set-associative cache.
///
/// Slot `i` belongs to set `i / line_number`. Each set keeps an access history of set-relative
/// line offsets ordered from least to most recently used; policies read it through
/// [`SetView`]. The store and policy are held by value; pass `&mut` references to keep
/// ownership on the caller side.
pub struct Cache<K, V, S, P, H = DefaultKeyHasher> {
    pub(crate) lines: Vec<Option<Line<K, V>>>,
    pub(crate) history: Vec<Vec<usize>>,
    pub(crate) line_number: usize,
    pub(crate) n_way: usize,
    pub(crate) write_back: bool,
    pub(crate) reserved: Option<K>,
    pub(crate) hasher: H,
    pub(crate) store: S,
    pub(crate) policy: P,
    pub(crate) stats: CacheStats,
}

impl<K, V, S, P> Cache<K, V, S, P>
where
    K: Hash + Eq + Clone,
    V: Clone + PartialEq,
    S: BackingStore<K, V>,
    P: ReplacementPolicy<K, V>,
{
    /// Creates a cache with the default hasher and no reserved key.
    ///
    /// # Arguments
    ///
    /// * `store` - Backing store consulted in write-back mode.
    /// * `policy` - Victim selection for full sets.
    /// * `capacity` - Requested number of lines; rounded up to a multiple of `ways`.
    /// * `ways` - Number of sets, in `1..=capacity`.
    /// * `write_back` - Write-back (`true`) or write-through (`false`) consistency.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a zero capacity, zero ways, or more ways than lines.
    pub fn new(
        store: S,
        policy: P,
        capacity: usize,
        ways: usize,
        write_back: bool,
    ) -> Result<Self, ConfigError> {
        CacheBuilder::new()
            .store(store)
            .policy(policy)
            .capacity(capacity)
            .ways(ways)
            .write_back(write_back)
            .build()
    }
}

impl<K, V, S> Cache<K, V, S, Box<dyn ReplacementPolicy<K, V>>>
where
    K: Hash + Eq + Clone,
    V: Clone + PartialEq,
    S: BackingStore<K, V>,
{
    /// Creates a cache whose geometry, mode, and policy come from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configured geometry is invalid.
    pub fn from_config(store: S, config: &CacheConfig) -> Result<Self, ConfigError> {
        CacheBuilder::new()
            .store(store)
            .policy(policies::from_kind(config.policy, config.seed))
            .config(config)
            .build()
    }
}

impl<K, V, S, P, H> Cache<K, V, S, P, H>
where
    K: Hash + Eq + Clone,
    V: Clone + PartialEq,
    S: BackingStore<K, V>,
    P: ReplacementPolicy<K, V>,
    H: BuildHasher,
{
    /// Inserts or updates `key`.
    ///
    /// # Returns
    ///
    /// The value pushed out of the cache by this call. That is `Some` only when a full set
    /// evicted a dirty line; in write-back mode the value has also been written to the store.
    ///
    /// # Errors
    ///
    /// * `KeyReserved` - `key` is the reserved key; nothing changes.
    /// * `VictimOutOfRange` - the policy chose a line outside the set.
    /// * `Store` - flushing a dirty victim failed.
    pub fn put(&mut self, key: K, value: V) -> CacheResult<Option<V>> {
        self.check_key(&key)?;
        let set = self.set_of(&key);
        let result = match self.find(set, &key) {
            Some(offset) => {
                let slot = set * self.line_number + offset;
                if let Some(line) = self.lines[slot].as_mut() {
                    if line.value.as_ref() != Some(&value) {
                        line.dirty = true;
                    }
                    line.value = Some(value);
                }
                self.touch(set, offset);
                Ok(None)
            }
            None => self.install(set, key, Some(value), true),
        };
        self.policy.refresh(Operation::Put);
        result
    }

    /// Reads `key`.
    ///
    /// A hit marks the line most recently used. A miss in write-back mode refills the line from
    /// the store, possibly evicting another line. When the store has no value either, the line
    /// remembers that, and later reads of the key hit without fetching again.
    ///
    /// # Errors
    ///
    /// * `EntryNotFound` - write-through miss, or the store has no value for the key.
    /// * `KeyReserved` - `key` is the reserved key.
    /// * `Store` - the store failed during the refill.
    pub fn get(&mut self, key: &K) -> CacheResult<V> {
        self.check_key(key)?;
        let result = self.lookup(key);
        self.policy.refresh(Operation::Get);
        result
    }

    /// Returns `true` if a value for `key` is cached. Never consults the store.
    pub fn contains_key(&mut self, key: &K) -> bool {
        let found = self.line(key).is_some_and(|line| line.value.is_some());
        self.policy.refresh(Operation::ContainsKey);
        found
    }

    /// Removes `key` from the cache and, in write-back mode, from the store.
    ///
    /// A key that is no longer cached is never brought back into the cache on its way out.
    ///
    /// # Returns
    ///
    /// The cached value, or the stored value if the key had already been evicted.
    ///
    /// # Errors
    ///
    /// * `EntryNotFound` - the key is not cached and (in write-back mode) not stored either.
    /// * `KeyReserved` - `key` is the reserved key.
    /// * `Store` - removing the key from the store failed.
    pub fn remove(&mut self, key: &K) -> CacheResult<V> {
        self.check_key(key)?;
        let result = self.evict_key(key);
        self.policy.refresh(Operation::Remove);
        result
    }

    /// Applies `put` to every pair in order.
    ///
    /// # Returns
    ///
    /// One `put` result per input pair, in input order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing `put`; pairs before it stay applied.
    pub fn put_all<I>(&mut self, entries: I) -> CacheResult<Vec<Option<V>>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries = entries.into_iter();
        let mut evicted = Vec::with_capacity(entries.size_hint().0);
        for (key, value) in entries {
            evicted.push(self.put(key, value)?);
        }
        self.policy.refresh(Operation::PutAll);
        Ok(evicted)
    }

    /// Empties every line. The store is left untouched.
    pub fn clear(&mut self) {
        self.policy.refresh(Operation::Clear);
        self.reset();
    }

    /// Empties every line and the backing store.
    ///
    /// # Errors
    ///
    /// Returns `Store` if clearing the store failed; the cache itself is already empty.
    pub fn deep_clear(&mut self) -> CacheResult<()> {
        self.policy.refresh(Operation::DeepClear);
        self.reset();
        self.store.clear()?;
        Ok(())
    }

    /// Writes every dirty line to the store and marks it clean.
    ///
    /// Lines stay cached. Write-through caches never touch the store, so this is a no-op there.
    ///
    /// # Returns
    ///
    /// The number of lines written.
    ///
    /// # Errors
    ///
    /// Returns `Store` on the first failed write; lines flushed before it are already clean.
    pub fn flush(&mut self) -> CacheResult<usize> {
        if !self.write_back {
            return Ok(0);
        }
        let mut written = 0;
        for line in self.lines.iter_mut().flatten() {
            let (true, Some(value)) = (line.dirty, line.value.as_ref()) else {
                continue;
            };
            self.store.put(line.key.clone(), value.clone())?;
            line.dirty = false;
            written += 1;
        }
        self.stats.write_backs += written as u64;
        debug!(written, "flushed dirty lines");
        Ok(written)
    }

    /// Runs one tagged operation and discards its result value.
    ///
    /// `value` is only used by `Put` and `PutAll`; `PutAll` replays as a batch of one.
    ///
    /// # Errors
    ///
    /// Whatever the dispatched operation returns.
    pub fn replay(&mut self, key: K, value: V, op: Operation) -> CacheResult<()> {
        trace!(%op, "replaying operation");
        match op {
            Operation::Put => self.put(key, value).map(|_| ()),
            Operation::Get => self.get(&key).map(|_| ()),
            Operation::Remove => self.remove(&key).map(|_| ()),
            Operation::PutAll => self.put_all([(key, value)]).map(|_| ()),
            Operation::Clear => {
                self.clear();
                Ok(())
            }
            Operation::DeepClear => self.deep_clear(),
            Operation::ContainsKey => {
                let _ = self.contains_key(&key);
                Ok(())
            }
        }
    }

    /// Reads `key` without touching history, statistics, the policy, or the store.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.line(key).and_then(Line::value)
    }

    /// `true` if `key` is cached and not yet written to the store.
    pub fn is_dirty(&self, key: &K) -> bool {
        self.line(key).is_some_and(Line::is_dirty)
    }

    /// Set index for `key`: `(hash(key) mod cache_size) / line_number`.
    pub fn set_of(&self, key: &K) -> usize {
        let slot = self.hasher.hash_one(key) % self.lines.len() as u64;
        slot as usize / self.line_number
    }

    fn check_key(&self, key: &K) -> CacheResult<()> {
        if self.reserved.as_ref() == Some(key) {
            return Err(CacheError::KeyReserved);
        }
        Ok(())
    }

    /// Offset of `key` within `set`, by linear scan.
    fn find(&self, set: usize, key: &K) -> Option<usize> {
        let base = set * self.line_number;
        self.lines[base..base + self.line_number]
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|line| line.key == *key))
    }

    fn line(&self, key: &K) -> Option<&Line<K, V>> {
        let set = self.set_of(key);
        self.find(set, key)
            .and_then(|offset| self.lines[set * self.line_number + offset].as_ref())
    }

    fn lookup(&mut self, key: &K) -> CacheResult<V> {
        let set = self.set_of(key);
        if let Some(offset) = self.find(set, key) {
            self.stats.hits += 1;
            self.touch(set, offset);
            return self.lines[set * self.line_number + offset]
                .as_ref()
                .and_then(|line| line.value.clone())
                .ok_or(CacheError::EntryNotFound);
        }

        self.stats.misses += 1;
        if !self.write_back {
            return Err(CacheError::EntryNotFound);
        }

        self.stats.store_fetches += 1;
        let fetched = self.store.get(key)?;
        if fetched.is_some() {
            debug!(set, "refilling line from store");
        } else {
            trace!(set, "remembering store miss");
        }
        let _ = self.install(set, key.clone(), fetched.clone(), false)?;
        fetched.ok_or(CacheError::EntryNotFound)
    }

    /// Places an absent key into `set`, evicting a line if the set is full.
    fn install(&mut self, set: usize, key: K, value: Option<V>, dirty: bool) -> CacheResult<Option<V>> {
        let base = set * self.line_number;

        if let Some(offset) = self.lines[base..base + self.line_number]
            .iter()
            .position(Option::is_none)
        {
            self.lines[base + offset] = Some(Line::new(key, value, dirty));
            self.touch(set, offset);
            return Ok(None);
        }

        let view = SetView::new(set, self.line_number, &self.history, &self.lines);
        let offset = self.policy.replacement_index(&view);
        if offset >= self.line_number {
            return Err(CacheError::VictimOutOfRange {
                offset,
                lines: self.line_number,
            });
        }

        let slot = base + offset;
        if self.write_back {
            let dirty_victim = self.lines[slot]
                .as_ref()
                .filter(|line| line.dirty)
                .and_then(|line| line.value.as_ref().map(|old| (&line.key, old)));
            if let Some((old_key, old)) = dirty_victim {
                debug!(set, offset, "writing back dirty victim");
                self.store.put(old_key.clone(), old.clone())?;
                self.stats.write_backs += 1;
            }
        }

        let victim = self.lines[slot].replace(Line::new(key, value, dirty));
        self.stats.evictions += 1;
        self.touch(set, offset);
        trace!(set, offset, "evicted line");

        Ok(victim.filter(|line| line.dirty).and_then(|line| line.value))
    }

    fn evict_key(&mut self, key: &K) -> CacheResult<V> {
        let set = self.set_of(key);
        let cached = match self.find(set, key) {
            Some(offset) => {
                self.forget(set, offset);
                self.lines[set * self.line_number + offset]
                    .take()
                    .and_then(|line| line.value)
            }
            None => None,
        };
        let stored = if self.write_back {
            self.store.remove(key)?
        } else {
            None
        };
        cached.or(stored).ok_or(CacheError::EntryNotFound)
    }

    /// Moves `offset` to the most-recently-used end of the set's history.
    fn touch(&mut self, set: usize, offset: usize) {
        let history = &mut self.history[set];
        if let Some(pos) = history.iter().position(|&o| o == offset) {
            let _ = history.remove(pos);
        }
        history.push(offset);
    }

    fn forget(&mut self, set: usize, offset: usize) {
        self.history[set].retain(|&o| o != offset);
    }
}

impl<K, V, S, P, H> Cache<K, V, S, P, H> {
    /// Actual capacity: `lines_per_set() * ways()`, never less than requested.
    pub fn capacity(&self) -> usize {
        self.lines.len()
    }

    /// Number of sets.
    pub const fn ways(&self) -> usize {
        self.n_way
    }

    /// Lines in each set.
    pub const fn lines_per_set(&self) -> usize {
        self.line_number
    }

    /// `true` for write-back consistency.
    pub const fn is_write_back(&self) -> bool {
        self.write_back
    }

    /// The key that may never be stored, if one was reserved.
    pub const fn reserved_key(&self) -> Option<&K> {
        self.reserved.as_ref()
    }

    /// Number of cached values. Lines remembering a store miss are not counted.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// `true` if no value is cached.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Cached entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.lines
            .iter()
            .flatten()
            .filter_map(|line| line.value.as_ref().map(|value| (&line.key, value)))
    }

    /// Access history of `set`, least recently used first.
    pub fn history(&self, set: usize) -> &[usize] {
        self.history.get(set).map(Vec::as_slice).unwrap_or_default()
    }

    /// Lifetime counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zeroes the counters.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The backing store, mutably. Writes made here bypass the cache.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The replacement policy.
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// Consumes the cache, returning its store and policy.
    pub fn into_parts(self) -> (S, P) {
        (self.store, self.policy)
    }

    fn reset(&mut self) {
        self.lines.iter_mut().for_each(|slot| *slot = None);
        self.history.iter_mut().for_each(Vec::clear);
    }
}

impl<K, V, S, P, H> fmt::Debug for Cache<K, V, S, P, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("capacity", &self.capacity())
            .field("ways", &self.n_way)
            .field("lines_per_set", &self.line_number)
            .field("write_back", &self.write_back)
            .field("len", &self.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
