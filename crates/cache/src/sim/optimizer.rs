//! Associativity optimizer.
//!
//! For every way-count in `1..=capacity` this builds a fresh write-back cache over a counting
//! [`MemoryStore`], replays the trace through `Cache::replay`, and records how many times the
//! store was read. The first way-count with the strictly lowest count wins.

use std::hash::{BuildHasher, Hash};

use serde::Serialize;
use tracing::{debug, info};

use super::trace::TraceEntry;
use crate::cache::CacheBuilder;
use crate::cache::policies::ReplacementPolicy;
use crate::common::error::{CacheError, CacheResult, ConfigError};
use crate::common::hash::DefaultKeyHasher;
use crate::stats::CacheStats;
use crate::store::MemoryStore;

/// Outcome of replaying the trace at one way-count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Number of sets.
    pub ways: usize,
    /// Backing-store reads issued during the replay.
    pub fetches: u64,
    /// Engine counters at the end of the replay.
    pub stats: CacheStats,
}

/// Result of an optimizer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizerReport {
    /// Requested capacity shared by every candidate.
    pub capacity: usize,
    /// Way-count with the fewest fetches; the smallest one on ties.
    pub best_ways: usize,
    /// Fetch count of `best_ways`.
    pub best_fetches: u64,
    /// Every evaluated way-count, ascending.
    pub candidates: Vec<Candidate>,
}

impl OptimizerReport {
    /// Looks up the candidate for `ways`.
    pub fn candidate(&self, ways: usize) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.ways == ways)
    }
}

/// Searches `1..=capacity` for the way-count with the fewest store fetches.
///
/// `policy` is lent to each candidate cache in turn. Lookups of keys neither cached nor stored
/// do not abort the replay; the cache remembers them, so only the first one costs a fetch.
///
/// # Errors
///
/// * `Config` - `capacity` is zero.
/// * `VictimOutOfRange` - the policy chose a line outside a set.
/// * `KeyReserved`, `Store` - propagated from the replay.
pub fn optimize<K, V, P>(
    capacity: usize,
    trace: &[TraceEntry<K, V>],
    policy: &mut P,
) -> CacheResult<OptimizerReport>
where
    K: Hash + Eq + Clone,
    V: Clone + PartialEq,
    P: ReplacementPolicy<K, V> + ?Sized,
{
    optimize_with_hasher(capacity, trace, policy, &DefaultKeyHasher::default())
}

/// [`optimize`] with an explicit set-mapping hasher.
///
/// # Errors
///
/// Same as [`optimize`].
pub fn optimize_with_hasher<K, V, P, H>(
    capacity: usize,
    trace: &[TraceEntry<K, V>],
    policy: &mut P,
    hasher: &H,
) -> CacheResult<OptimizerReport>
where
    K: Hash + Eq + Clone,
    V: Clone + PartialEq,
    P: ReplacementPolicy<K, V> + ?Sized,
    H: BuildHasher + Clone,
{
    if capacity == 0 {
        return Err(ConfigError::ZeroCapacity.into());
    }

    let mut candidates = Vec::with_capacity(capacity);
    let mut best: Option<(usize, u64)> = None;

    for ways in 1..=capacity {
        let candidate = evaluate(capacity, ways, trace, &mut *policy, hasher.clone())?;
        info!(
            ways,
            fetches = candidate.fetches,
            hit_rate = candidate.stats.hit_rate(),
            "evaluated candidate"
        );
        if best.is_none_or(|(_, fetches)| candidate.fetches < fetches) {
            best = Some((ways, candidate.fetches));
        }
        candidates.push(candidate);
    }

    let (best_ways, best_fetches) = best.unwrap_or((1, 0));
    debug!(capacity, best_ways, best_fetches, "optimizer finished");
    Ok(OptimizerReport {
        capacity,
        best_ways,
        best_fetches,
        candidates,
    })
}

/// Runs [`optimize`] and returns only the winning way-count.
///
/// # Errors
///
/// Same as [`optimize`].
pub fn lowest_miss_ways<K, V, P>(
    capacity: usize,
    trace: &[TraceEntry<K, V>],
    policy: &mut P,
) -> CacheResult<usize>
where
    K: Hash + Eq + Clone,
    V: Clone + PartialEq,
    P: ReplacementPolicy<K, V> + ?Sized,
{
    optimize(capacity, trace, policy).map(|report| report.best_ways)
}

fn evaluate<K, V, P, H>(
    capacity: usize,
    ways: usize,
    trace: &[TraceEntry<K, V>],
    policy: &mut P,
    hasher: H,
) -> CacheResult<Candidate>
where
    K: Hash + Eq + Clone,
    V: Clone + PartialEq,
    P: ReplacementPolicy<K, V> + ?Sized,
    H: BuildHasher,
{
    let mut cache = CacheBuilder::new()
        .store(MemoryStore::<K, V>::new())
        .policy(policy)
        .capacity(capacity)
        .ways(ways)
        .write_back(true)
        .hasher(hasher)
        .build()?;

    for entry in trace {
        match cache.replay(entry.key.clone(), entry.value.clone(), entry.op) {
            Ok(()) | Err(CacheError::EntryNotFound) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(Candidate {
        ways,
        fetches: cache.store().fetches(),
        stats: cache.stats().clone(),
    })
}
