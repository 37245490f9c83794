//! # Configuration Tests
//!
//! Tests for configuration structures, deserialization, defaults, and
//! validation.

use pretty_assertions::assert_eq;

use memsim_core::common::data::LevelId;
use memsim_core::common::error::ConfigError;
use memsim_core::config::{Config, LevelConfig};

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.icache.sets, 128);
    assert_eq!(config.icache.assoc, 4);
    assert_eq!(config.icache.hit_time, 1);
    assert_eq!(config.dcache, config.icache);
    assert_eq!(config.l2.sets, 1024);
    assert_eq!(config.l2.assoc, 8);
    assert_eq!(config.l2.hit_time, 10);
    assert_eq!(config.block_size, 64);
    assert_eq!(config.memory_latency, 100);
    assert!(!config.inclusive);
}

#[test]
fn test_level_config_defaults() {
    let level = LevelConfig::default();
    assert_eq!(level.sets, 128);
    assert_eq!(level.assoc, 4);
    assert_eq!(level.hit_time, 1);
}

#[test]
fn test_default_config_validates() {
    assert_eq!(Config::default().validate(), Ok(()));
}

#[test]
fn test_deserialize_full_json() {
    let json = r#"{
        "icache": { "sets": 64, "assoc": 2, "hit_time": 2 },
        "dcache": { "sets": 256, "assoc": 8, "hit_time": 3 },
        "l2": { "sets": 2048, "assoc": 16, "hit_time": 15 },
        "block_size": 32,
        "memory_latency": 150,
        "inclusive": true
    }"#;
    let config: Config = serde_json::from_str(json).expect("well-formed config");
    assert_eq!(config.icache.sets, 64);
    assert_eq!(config.dcache.assoc, 8);
    assert_eq!(config.l2.hit_time, 15);
    assert_eq!(config.block_size, 32);
    assert_eq!(config.memory_latency, 150);
    assert!(config.inclusive);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_deserialize_empty_json_is_default() {
    let config: Config = serde_json::from_str("{}").expect("empty config");
    assert_eq!(config, Config::default());
}

#[test]
fn test_deserialize_partial_level() {
    // Unspecified level fields fall back to their serde defaults.
    let config: Config = serde_json::from_str(r#"{ "icache": { "sets": 32 } }"#)
        .expect("partial config");
    assert_eq!(config.icache.sets, 32);
    assert_eq!(config.icache.assoc, 4);
    assert_eq!(config.icache.hit_time, 1);
    assert_eq!(config.l2.sets, 1024);
}

#[test]
fn test_validate_rejects_zero_block_size() {
    let config = Config {
        block_size: 0,
        ..Config::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::BlockSize(0)));
}

#[test]
fn test_validate_rejects_non_power_of_two_block_size() {
    let config = Config {
        block_size: 48,
        ..Config::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::BlockSize(48)));
}

#[test]
fn test_validate_rejects_non_power_of_two_sets() {
    let config = Config {
        icache: LevelConfig {
            sets: 3,
            assoc: 2,
            hit_time: 1,
        },
        ..Config::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::Sets {
            level: LevelId::ICache,
            sets: 3
        })
    );
}

#[test]
fn test_validate_rejects_zero_associativity() {
    let config = Config {
        dcache: LevelConfig {
            sets: 16,
            assoc: 0,
            hit_time: 1,
        },
        ..Config::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::Associativity {
            level: LevelId::DCache,
            assoc: 0
        })
    );
}

#[test]
fn test_validate_rejects_geometry_exhausting_address() {
    // 2^26 sets of 64-byte blocks consume all 32 address bits.
    let config = Config {
        l2: LevelConfig {
            sets: 1 << 26,
            assoc: 1,
            hit_time: 10,
        },
        ..Config::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::NoTagBits {
            level: LevelId::L2,
            index_bits: 26,
            offset_bits: 6
        })
    );
}

#[test]
fn test_validate_skips_absent_levels() {
    // Zero sets disables a level; its other fields are never inspected.
    let config = Config {
        icache: LevelConfig {
            sets: 0,
            assoc: 3,
            hit_time: 1,
        },
        ..Config::default()
    };
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_config_error_messages_name_the_level() {
    let err = ConfigError::Sets {
        level: LevelId::DCache,
        sets: 12,
    };
    assert_eq!(
        err.to_string(),
        "L1-D cache: set count must be zero or a power of two, got 12"
    );
}
