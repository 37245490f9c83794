//! Simulation statistics collection and reporting.
//!
//! This module tracks the outcome counters of a simulation run. It provides:
//! 1. **Counters:** References, misses, and penalty cycles per cache level.
//! 2. **Derived metrics:** Miss rate and average access time, computed on demand.
//! 3. **Reporting:** A plain-text summary of the whole hierarchy.
//!
//! Counters are purely additive and monotonically non-decreasing; nothing
//! here makes decisions. Derived metrics guard against levels that were
//! never referenced.

use crate::common::data::LevelId;
use crate::config::Config;

/// Counter triple for one cache level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelStats {
    /// References that reached this level.
    pub refs: u64,
    /// References that missed at this level.
    pub misses: u64,
    /// Penalty cycles accumulated by this level's misses.
    pub penalty_cycles: u64,
}

impl LevelStats {
    /// Fraction of references that missed; 0 when the level saw no traffic.
    pub fn miss_rate(&self) -> f64 {
        if self.refs == 0 {
            0.0
        } else {
            self.misses as f64 / self.refs as f64
        }
    }

    /// Mean penalty cycles per miss; 0 when the level never missed.
    pub fn penalty_per_miss(&self) -> f64 {
        if self.misses == 0 {
            0.0
        } else {
            self.penalty_cycles as f64 / self.misses as f64
        }
    }

    /// Average access time at this level for a given hit time.
    ///
    /// `hit_time + miss_rate * penalty_per_miss`, the standard AMAT
    /// formulation.
    pub fn avg_access_time(&self, hit_time: u64) -> f64 {
        hit_time as f64 + self.miss_rate() * self.penalty_per_miss()
    }
}

/// Statistics for the whole hierarchy: one counter triple per level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// L1 instruction cache counters.
    pub icache: LevelStats,
    /// L1 data cache counters.
    pub dcache: LevelStats,
    /// Shared L2 cache counters.
    pub l2: LevelStats,
}

impl Stats {
    /// Records one reference at `level`.
    ///
    /// Every call counts a reference; a miss additionally counts the miss
    /// and its penalty cycles. Called once per level actually touched by an
    /// access — absent levels are never recorded.
    pub fn record(&mut self, level: LevelId, missed: bool, penalty_cycles: u64) {
        let counters = self.level_mut(level);
        counters.refs += 1;
        if missed {
            counters.misses += 1;
            counters.penalty_cycles += penalty_cycles;
        }
    }

    /// The counter triple for one level.
    pub fn level(&self, level: LevelId) -> &LevelStats {
        match level {
            LevelId::ICache => &self.icache,
            LevelId::DCache => &self.dcache,
            LevelId::L2 => &self.l2,
        }
    }

    /// Prints the statistics report to stdout.
    ///
    /// Hit times come from the configuration so average access times can be
    /// derived per level. Levels configured absent print with all counters
    /// at zero.
    pub fn print(&self, config: &Config) {
        let print_level = |level: LevelId, counters: &LevelStats, hit_time: u64| {
            println!(
                "  {:<5} refs: {:<12} | misses: {:<10} | miss_rate: {:.4}",
                level.to_string(),
                counters.refs,
                counters.misses,
                counters.miss_rate()
            );
            println!(
                "        penalties: {:<12} | avg_access_time: {:.4} cycles",
                counters.penalty_cycles,
                counters.avg_access_time(hit_time)
            );
        };
        println!("\n==========================================================");
        println!("CACHE HIERARCHY SIMULATION STATISTICS");
        println!("==========================================================");
        print_level(LevelId::ICache, &self.icache, config.icache.hit_time);
        print_level(LevelId::DCache, &self.dcache, config.dcache.hit_time);
        print_level(LevelId::L2, &self.l2, config.l2.hit_time);
        println!("==========================================================");
    }

    /// Mutable counter triple for one level.
    fn level_mut(&mut self, level: LevelId) -> &mut LevelStats {
        match level {
            LevelId::ICache => &mut self.icache,
            LevelId::DCache => &mut self.dcache,
            LevelId::L2 => &mut self.l2,
        }
    }
}
