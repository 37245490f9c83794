//! Configuration system for the cache hierarchy simulator.
//!
//! This module defines all configuration structures used to parameterize a
//! simulation run. It provides:
//! 1. **Defaults:** Baseline hierarchy geometry and latencies.
//! 2. **Structures:** Per-level geometry plus the shared block size, memory latency, and inclusion flag.
//! 3. **Validation:** Power-of-two and address-width checks performed once at initialization.
//!
//! Configuration is supplied as JSON (see the example below) or via
//! `Config::default()` from the CLI.

use serde::Deserialize;

use crate::common::data::LevelId;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline hierarchy when fields are not explicitly
/// overridden in a JSON configuration.
mod defaults {
    /// Default L1 set count (128 sets).
    pub const L1_SETS: u32 = 128;

    /// Default L1 associativity (4 ways).
    pub const L1_ASSOC: u32 = 4;

    /// Default L1 hit time in cycles.
    pub const L1_HIT_TIME: u64 = 1;

    /// Default L2 set count (1024 sets).
    pub const L2_SETS: u32 = 1024;

    /// Default L2 associativity (8 ways).
    pub const L2_ASSOC: u32 = 8;

    /// Default L2 hit time in cycles.
    pub const L2_HIT_TIME: u64 = 10;

    /// Default block size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes.
    pub const BLOCK_SIZE: u32 = 64;

    /// Default main memory latency in cycles.
    pub const MEMORY_LATENCY: u64 = 100;
}

/// Geometry and hit time of one cache level.
///
/// A set count of zero disables the level entirely: its accesses forward to
/// the next level and none of its counters move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LevelConfig {
    /// Number of sets; a power of two, or zero to disable the level.
    #[serde(default = "LevelConfig::default_sets")]
    pub sets: u32,

    /// Associativity (lines per set); a nonzero power of two.
    #[serde(default = "LevelConfig::default_assoc")]
    pub assoc: u32,

    /// Access latency in cycles on a hit at this level.
    #[serde(default = "LevelConfig::default_hit_time")]
    pub hit_time: u64,
}

impl LevelConfig {
    /// Returns the default set count.
    fn default_sets() -> u32 {
        defaults::L1_SETS
    }

    /// Returns the default associativity.
    fn default_assoc() -> u32 {
        defaults::L1_ASSOC
    }

    /// Returns the default hit time in cycles.
    fn default_hit_time() -> u64 {
        defaults::L1_HIT_TIME
    }
}

impl Default for LevelConfig {
    /// Creates the default L1-style level configuration.
    fn default() -> Self {
        Self {
            sets: defaults::L1_SETS,
            assoc: defaults::L1_ASSOC,
            hit_time: defaults::L1_HIT_TIME,
        }
    }
}

/// Root configuration for one simulation run.
///
/// Immutable after initialization; one instance parameterizes one hierarchy.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use memsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.block_size, 64);
/// assert_eq!(config.l2.sets, 1024);
/// assert!(!config.inclusive);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use memsim_core::config::Config;
///
/// let json = r#"{
///     "icache": { "sets": 64,  "assoc": 2, "hit_time": 1 },
///     "dcache": { "sets": 64,  "assoc": 2, "hit_time": 1 },
///     "l2":     { "sets": 512, "assoc": 8, "hit_time": 12 },
///     "block_size": 32,
///     "memory_latency": 120,
///     "inclusive": true
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// config.validate().unwrap();
/// assert_eq!(config.icache.sets, 64);
/// assert_eq!(config.l2.hit_time, 12);
/// assert!(config.inclusive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// L1 instruction cache geometry.
    #[serde(default)]
    pub icache: LevelConfig,

    /// L1 data cache geometry.
    #[serde(default)]
    pub dcache: LevelConfig,

    /// Shared L2 cache geometry.
    #[serde(default = "Config::default_l2")]
    pub l2: LevelConfig,

    /// Block size in bytes, shared by every level; a nonzero power of two.
    #[serde(default = "Config::default_block_size")]
    pub block_size: u32,

    /// Main memory latency in cycles.
    #[serde(default = "Config::default_memory_latency")]
    pub memory_latency: u64,

    /// Whether L2 is inclusive of both L1 caches.
    ///
    /// When set, a block evicted from L2 is invalidated in whichever L1
    /// holds it.
    #[serde(default)]
    pub inclusive: bool,
}

impl Config {
    /// Returns the default L2 geometry.
    fn default_l2() -> LevelConfig {
        LevelConfig {
            sets: defaults::L2_SETS,
            assoc: defaults::L2_ASSOC,
            hit_time: defaults::L2_HIT_TIME,
        }
    }

    /// Returns the default block size in bytes.
    fn default_block_size() -> u32 {
        defaults::BLOCK_SIZE
    }

    /// Returns the default main memory latency in cycles.
    fn default_memory_latency() -> u64 {
        defaults::MEMORY_LATENCY
    }

    /// Checks the configuration for degenerate geometry.
    ///
    /// Enforces, for the block size and every present level: powers of two
    /// where required, nonzero associativity, and at least one tag bit left
    /// in a 32-bit address after index and offset bits. Levels with zero
    /// sets are absent and skip the per-level checks.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found. The hierarchy constructor
    /// calls this, so an invalid configuration can never produce a running
    /// simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::BlockSize(self.block_size));
        }
        let levels = [
            (LevelId::ICache, &self.icache),
            (LevelId::DCache, &self.dcache),
            (LevelId::L2, &self.l2),
        ];
        for (level, cfg) in levels {
            if cfg.sets == 0 {
                continue;
            }
            if !cfg.sets.is_power_of_two() {
                return Err(ConfigError::Sets {
                    level,
                    sets: cfg.sets,
                });
            }
            if !cfg.assoc.is_power_of_two() {
                return Err(ConfigError::Associativity {
                    level,
                    assoc: cfg.assoc,
                });
            }
            let index_bits = cfg.sets.trailing_zeros();
            let offset_bits = self.block_size.trailing_zeros();
            if index_bits + offset_bits >= u32::BITS {
                return Err(ConfigError::NoTagBits {
                    level,
                    index_bits,
                    offset_bits,
                });
            }
        }
        Ok(())
    }
}

impl Default for Config {
    /// Creates the default two-level hierarchy configuration.
    fn default() -> Self {
        Self {
            icache: LevelConfig::default(),
            dcache: LevelConfig::default(),
            l2: Self::default_l2(),
            block_size: defaults::BLOCK_SIZE,
            memory_latency: defaults::MEMORY_LATENCY,
            inclusive: false,
        }
    }
}
