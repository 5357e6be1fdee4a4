//! Cache Replacement Policy Tests.
//!
//! Verifies victim selection for LRU, MRU, FIFO, and Random by filling one set of a live cache
//! and observing which key disappears on the next insertion.

use pretty_assertions::assert_eq;

use nway_cache::cache::policies::{self, FifoPolicy, MruPolicy, RandomPolicy};
use nway_cache::config::PolicyKind;

use crate::common::{cached_keys, identity_cache, lru_cache};

// ══════════════════════════════════════════════════════════
// 1. LRU Policy
// ══════════════════════════════════════════════════════════

/// Keys 0..4 fill set 0 in order, so key 0 is least recent.
#[test]
fn lru_evicts_oldest_insertion() {
    let mut cache = lru_cache(8, 2, false);
    for key in 0..4 {
        let _ = cache.put(key, key).unwrap();
    }
    let _ = cache.put(8, 8).unwrap();
    assert_eq!(cached_keys(&cache), vec![1, 2, 3, 8]);
}

/// Reading key 0 promotes it, so key 1 becomes the victim.
#[test]
fn lru_evicts_true_lru_after_reaccess() {
    let mut cache = lru_cache(8, 2, false);
    for key in 0..4 {
        let _ = cache.put(key, key).unwrap();
    }
    let _ = cache.get(&0).unwrap();
    let _ = cache.put(8, 8).unwrap();
    assert_eq!(cached_keys(&cache), vec![0, 2, 3, 8]);
}

/// Updating a key counts as a use.
#[test]
fn lru_update_promotes_line() {
    let mut cache = lru_cache(8, 2, false);
    for key in 0..4 {
        let _ = cache.put(key, key).unwrap();
    }
    let _ = cache.put(0, 99).unwrap();
    let _ = cache.put(8, 8).unwrap();
    assert_eq!(cached_keys(&cache), vec![0, 2, 3, 8]);
}

/// `contains_key` is not an access.
#[test]
fn lru_contains_key_does_not_promote() {
    let mut cache = lru_cache(8, 2, false);
    for key in 0..4 {
        let _ = cache.put(key, key).unwrap();
    }
    assert!(cache.contains_key(&0));
    let _ = cache.put(8, 8).unwrap();
    assert!(!cache.contains_key(&0));
}

/// Eviction in one set leaves the other set alone.
#[test]
fn lru_sets_are_independent() {
    let mut cache = lru_cache(8, 2, false);
    for key in [4, 5, 0, 1, 2, 3, 8] {
        let _ = cache.put(key, key).unwrap();
    }
    assert_eq!(cached_keys(&cache), vec![1, 2, 3, 4, 5, 8]);
    assert_eq!(cache.history(1), &[0, 1]);
}

// ══════════════════════════════════════════════════════════
// 2. MRU Policy
// ══════════════════════════════════════════════════════════

#[test]
fn mru_evicts_newest_line() {
    let mut cache = identity_cache(8, 2, false, MruPolicy);
    for key in 0..4 {
        let _ = cache.put(key, key).unwrap();
    }
    let _ = cache.put(8, 8).unwrap();
    assert_eq!(cached_keys(&cache), vec![0, 1, 2, 8]);
}

#[test]
fn mru_evicts_last_read_line() {
    let mut cache = identity_cache(8, 2, false, MruPolicy);
    for key in 0..4 {
        let _ = cache.put(key, key).unwrap();
    }
    let _ = cache.get(&1).unwrap();
    let _ = cache.put(8, 8).unwrap();
    assert_eq!(cached_keys(&cache), vec![0, 2, 3, 8]);
}

// ══════════════════════════════════════════════════════════
// 3. FIFO Policy
// ══════════════════════════════════════════════════════════

#[test]
fn fifo_rotates_through_the_set() {
    let mut cache = identity_cache(3, 1, false, FifoPolicy::new());
    for key in 1..=3 {
        let _ = cache.put(key, key).unwrap();
    }

    let _ = cache.put(4, 4).unwrap();
    assert_eq!(cached_keys(&cache), vec![2, 3, 4]);

    // Reads do not affect FIFO order.
    let _ = cache.get(&2).unwrap();
    let _ = cache.put(5, 5).unwrap();
    assert_eq!(cached_keys(&cache), vec![3, 4, 5]);

    let _ = cache.put(6, 6).unwrap();
    let _ = cache.put(7, 7).unwrap();
    assert_eq!(cached_keys(&cache), vec![5, 6, 7]);
}

#[test]
fn fifo_rewinds_on_clear() {
    let mut cache = identity_cache(3, 1, false, FifoPolicy::new());
    for key in 1..=4 {
        let _ = cache.put(key, key).unwrap();
    }
    cache.clear();

    for key in 1..=4 {
        let _ = cache.put(key, key).unwrap();
    }
    assert_eq!(cached_keys(&cache), vec![2, 3, 4]);
}

// ══════════════════════════════════════════════════════════
// 4. Random Policy
// ══════════════════════════════════════════════════════════

#[test]
fn random_with_same_seed_is_reproducible() {
    let run = |seed| {
        let mut cache = identity_cache(4, 1, false, RandomPolicy::with_seed(seed));
        for key in 0..50 {
            let _ = cache.put(key, key).unwrap();
        }
        cached_keys(&cache)
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn random_always_picks_a_line_in_the_set() {
    let mut cache = identity_cache(16, 4, false, RandomPolicy::with_seed(42));
    for key in 0..500 {
        let _ = cache.put(key, key).unwrap();
    }
    assert_eq!(cache.len(), 16);
    assert_eq!(cache.stats().evictions, 500 - 16);
}

// ══════════════════════════════════════════════════════════
// 5. Dynamic selection
// ══════════════════════════════════════════════════════════

#[test]
fn boxed_policy_from_kind_behaves_like_the_concrete_one() {
    let policy = policies::from_kind::<u64, u64>(PolicyKind::Mru, None);
    let mut cache = identity_cache(8, 2, false, policy);
    for key in 0..4 {
        let _ = cache.put(key, key).unwrap();
    }
    let _ = cache.put(8, 8).unwrap();
    assert_eq!(cached_keys(&cache), vec![0, 1, 2, 8]);
}

#[test]
fn borrowed_policy_keeps_its_state_across_caches() {
    let mut policy = FifoPolicy::new();
    {
        let mut cache = identity_cache(3, 1, false, &mut policy);
        for key in 1..=4 {
            let _ = cache.put(key, key).unwrap();
        }
    }
    let mut cache = identity_cache(3, 1, false, &mut policy);
    for key in 1..=4 {
        let _ = cache.put(key, key).unwrap();
    }
    // The pointer carried over from the first cache, so line 1 (key 2) is replaced.
    assert_eq!(cached_keys(&cache), vec![1, 3, 4]);
}
