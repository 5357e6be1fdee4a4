//! Configuration Tests.
//!
//! JSON loading with defaults and aliases, geometry validation, and building a cache from a
//! configuration.

use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;

use nway_cache::config::{CacheConfig, PolicyKind};
use nway_cache::{Cache, ConfigError, MemoryStore};

#[test]
fn full_document_round_trips_through_fields() {
    let config = CacheConfig::from_json(
        r#"{ "capacity": 10, "ways": 4, "write_back": false, "policy": "RANDOM", "seed": 9 }"#,
    )
    .unwrap();
    assert_eq!(
        config,
        CacheConfig {
            capacity: 10,
            ways: 4,
            write_back: false,
            policy: PolicyKind::Random,
            seed: Some(9),
        }
    );
    assert_eq!(config.lines_per_set(), 3);
}

#[rstest]
#[case("LRU", PolicyKind::Lru)]
#[case("Lru", PolicyKind::Lru)]
#[case("mru", PolicyKind::Mru)]
#[case("Fifo", PolicyKind::Fifo)]
#[case("random", PolicyKind::Random)]
fn policy_names_accept_common_spellings(#[case] name: &str, #[case] expected: PolicyKind) {
    let config = CacheConfig::from_json(&format!(r#"{{ "policy": "{name}" }}"#)).unwrap();
    assert_eq!(config.policy, expected);
}

#[test]
fn unknown_policy_is_a_parse_error() {
    let err = CacheConfig::from_json(r#"{ "policy": "clock" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        CacheConfig::from_json("{ capacity: "),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn reader_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "capacity": 16, "ways": 16 }}"#).unwrap();

    let reader = std::fs::File::open(file.path()).unwrap();
    let config = CacheConfig::from_reader(reader).unwrap();
    assert_eq!(config.capacity, 16);
    assert_eq!(config.ways, 16);
    assert!(config.write_back);
    assert_eq!(config.policy, PolicyKind::Lru);
}

#[rstest]
#[case(0, 1, Err(ConfigError::ZeroCapacity))]
#[case(1, 0, Err(ConfigError::ZeroWays))]
#[case(3, 4, Err(ConfigError::TooManyWays { ways: 4, capacity: 3 }))]
#[case(4, 4, Ok(()))]
#[case(5, 2, Ok(()))]
fn validate_checks_geometry(
    #[case] capacity: usize,
    #[case] ways: usize,
    #[case] expected: Result<(), ConfigError>,
) {
    let config = CacheConfig {
        capacity,
        ways,
        ..CacheConfig::default()
    };
    assert_eq!(config.validate(), expected);
}

#[test]
fn from_config_applies_geometry_mode_and_policy() {
    let config = CacheConfig {
        capacity: 10,
        ways: 4,
        write_back: false,
        policy: PolicyKind::Mru,
        seed: None,
    };
    let mut cache = Cache::from_config(MemoryStore::<u64, u64>::new(), &config).unwrap();
    assert_eq!(cache.capacity(), 12);
    assert_eq!(cache.lines_per_set(), 3);
    assert!(!cache.is_write_back());

    let _ = cache.put(1, 1).unwrap();
    assert_eq!(cache.get(&1).unwrap(), 1);
}

#[test]
fn from_config_rejects_invalid_geometry() {
    let config = CacheConfig {
        capacity: 2,
        ways: 3,
        ..CacheConfig::default()
    };
    let result = Cache::from_config(MemoryStore::<u64, u64>::new(), &config);
    assert_eq!(
        result.err(),
        Some(ConfigError::TooManyWays {
            ways: 3,
            capacity: 2
        })
    );
}
