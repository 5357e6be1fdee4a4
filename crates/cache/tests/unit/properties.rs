//! Randomized Invariant Tests.
//!
//! Geometry rounding, read-after-write, set capacity limits, and write-back durability over
//! arbitrary operation sequences.

use std::collections::HashMap;

use proptest::prelude::*;

use nway_cache::cache::policies::{LruPolicy, MruPolicy, RandomPolicy};
use nway_cache::{Cache, CacheError, MemoryStore};

use crate::common::identity_cache;

#[derive(Debug, Clone)]
enum Op {
    Put(u64, u64),
    Get(u64),
    Remove(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..40_u64, any::<u64>()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => (0..40_u64).prop_map(Op::Get),
        1 => (0..40_u64).prop_map(Op::Remove),
    ]
}

fn geometry() -> impl Strategy<Value = (usize, usize)> {
    (1..64_usize).prop_flat_map(|capacity| (Just(capacity), 1..=capacity))
}

proptest! {
    #[test]
    fn capacity_is_a_multiple_of_ways_and_never_smaller((requested, ways) in geometry()) {
        let cache = Cache::<u64, u64, _, _>::new(MemoryStore::new(), LruPolicy, requested, ways, true)
            .unwrap();
        prop_assert_eq!(cache.capacity() % ways, 0);
        prop_assert!(cache.capacity() >= requested);
        prop_assert!(cache.capacity() < requested + ways);
        prop_assert_eq!(cache.lines_per_set(), requested.div_ceil(ways));
    }

    #[test]
    fn put_then_get_returns_the_value(
        (capacity, ways) in geometry(),
        keys in prop::collection::vec(any::<u64>(), 1..50),
        write_back in any::<bool>(),
    ) {
        let mut cache = identity_cache(capacity, ways, write_back, MruPolicy);
        for (i, key) in keys.into_iter().enumerate() {
            let value = i as u64;
            let _ = cache.put(key, value).unwrap();
            prop_assert!(cache.contains_key(&key));
            prop_assert_eq!(cache.get(&key).unwrap(), value);
        }
    }

    #[test]
    fn occupancy_never_exceeds_capacity(
        (capacity, ways) in geometry(),
        ops in prop::collection::vec(op_strategy(), 0..200),
        seed in any::<u64>(),
    ) {
        let mut cache = identity_cache(capacity, ways, false, RandomPolicy::with_seed(seed));
        for op in ops {
            match op {
                Op::Put(k, v) => {
                    let _ = cache.put(k, v).unwrap();
                }
                Op::Get(k) => {
                    let _ = cache.get(&k);
                }
                Op::Remove(k) => {
                    let _ = cache.remove(&k);
                }
            }
            prop_assert!(cache.len() <= cache.capacity());
            for set in 0..cache.ways() {
                prop_assert!(cache.history(set).len() <= cache.lines_per_set());
            }
        }
    }

    #[test]
    fn write_back_never_loses_the_latest_value(
        (capacity, ways) in geometry(),
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut cache = identity_cache(capacity, ways, true, LruPolicy);
        let mut model: HashMap<u64, u64> = HashMap::new();

        for op in ops {
            match op {
                Op::Put(k, v) => {
                    let _ = cache.put(k, v).unwrap();
                    let _ = model.insert(k, v);
                }
                Op::Get(k) => match model.get(&k) {
                    Some(&v) => prop_assert_eq!(cache.get(&k).unwrap(), v),
                    None => prop_assert!(matches!(cache.get(&k), Err(CacheError::EntryNotFound))),
                },
                Op::Remove(k) => match model.remove(&k) {
                    Some(v) => prop_assert_eq!(cache.remove(&k).unwrap(), v),
                    None => prop_assert!(matches!(cache.remove(&k), Err(CacheError::EntryNotFound))),
                },
            }
        }

        for (k, v) in model {
            prop_assert_eq!(cache.get(&k).unwrap(), v);
        }
    }
}
