//! Two-level cache hierarchy controller.
//!
//! This module chains the split L1 caches, the shared L2, and main memory
//! into the per-access protocol: probe L1, fall through to L2 on a miss,
//! fall through to memory on an L2 miss, filling on the way back. It also
//! enforces the inclusion policy by pushing L2 evictions back into both L1
//! caches.
//!
//! The controller exclusively owns its caches and statistics; dropping it
//! releases all set and line storage.

use crate::common::data::{AccessKind, LevelId};
use crate::common::error::ConfigError;
use crate::config::{Config, LevelConfig};
use crate::core::cache::Cache;
use crate::stats::Stats;

/// Multi-level cache controller for one simulation run.
///
/// Each configured level is an owned [`Cache`]; a level configured with zero
/// sets is absent and its traffic forwards to the next level without
/// touching its counters. One access is fully resolved, including any
/// inclusion invalidation, before the next is admitted.
#[derive(Debug)]
pub struct Hierarchy {
    icache: Option<Cache>,
    dcache: Option<Cache>,
    l2: Option<Cache>,
    memory_latency: u64,
    inclusive: bool,
    stats: Stats,
}

impl Hierarchy {
    /// Builds the hierarchy described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration fails validation
    /// (non-power-of-two geometry, or index/offset bits exhausting the
    /// 32-bit address). This is the only failure the simulator can raise;
    /// it happens here or never.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let build = |level: &LevelConfig| {
            (level.sets > 0).then(|| Cache::new(level, config.block_size))
        };
        Ok(Self {
            icache: build(&config.icache),
            dcache: build(&config.dcache),
            l2: build(&config.l2),
            memory_latency: config.memory_latency,
            inclusive: config.inclusive,
            stats: Stats::default(),
        })
    }

    /// Processes one instruction fetch and returns its total latency.
    pub fn access_instruction(&mut self, addr: u32) -> u64 {
        self.access(addr, AccessKind::Instruction)
    }

    /// Processes one data reference and returns its total latency.
    pub fn access_data(&mut self, addr: u32) -> u64 {
        self.access(addr, AccessKind::Data)
    }

    /// Processes one reference through its level-1 cache.
    ///
    /// An L1 hit costs that cache's hit time. An L1 miss adds the shared
    /// stage's latency as penalty. When the originating L1 is absent the
    /// access forwards straight to the shared stage and only the levels that
    /// exist are counted.
    pub fn access(&mut self, addr: u32, kind: AccessKind) -> u64 {
        let probe = self
            .origin_mut(kind)
            .map(|l1| (l1.lookup(addr), l1.hit_time()));
        let Some((hit, hit_time)) = probe else {
            return self.access_shared(addr, kind);
        };
        if hit {
            self.stats.record(kind.level(), false, 0);
            return hit_time;
        }
        let penalty = self.access_shared(addr, kind);
        self.stats.record(kind.level(), true, penalty);
        hit_time + penalty
    }

    /// Statistics accumulated so far.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// The L1 instruction cache, when configured.
    pub fn icache(&self) -> Option<&Cache> {
        self.icache.as_ref()
    }

    /// The L1 data cache, when configured.
    pub fn dcache(&self) -> Option<&Cache> {
        self.dcache.as_ref()
    }

    /// The shared L2 cache, when configured.
    pub fn l2(&self) -> Option<&Cache> {
        self.l2.as_ref()
    }

    /// The shared stage: L2 lookup, memory fetch, fills, and inclusion.
    ///
    /// Returns the latency seen by the level above (the L1 miss penalty, or
    /// the whole access latency when no L1 is in front).
    fn access_shared(&mut self, addr: u32, kind: AccessKind) -> u64 {
        let outcome = self.l2.as_mut().map(|l2| {
            let hit = l2.lookup(addr);
            let displaced = if hit { None } else { l2.install(addr) };
            (hit, l2.hit_time(), displaced)
        });
        let Some((hit, l2_hit_time, displaced)) = outcome else {
            // No shared level configured: the reference degrades straight to
            // memory and is recorded nowhere at this stage.
            return self.memory_latency;
        };

        if hit {
            self.stats.record(LevelId::L2, false, 0);
            // The block entered the originating L1 together with L2 on the
            // earlier fill; only its recency there needs refreshing.
            self.touch_origin(addr, kind);
            return l2_hit_time;
        }

        if self.inclusive {
            if let Some(victim) = displaced {
                // Inclusion: a block leaving L2 may not remain in either L1,
                // regardless of which one triggered this miss.
                if let Some(icache) = self.icache.as_mut() {
                    icache.invalidate(victim);
                }
                if let Some(dcache) = self.dcache.as_mut() {
                    dcache.invalidate(victim);
                }
            }
        }
        self.fill_origin(addr, kind);

        self.stats.record(LevelId::L2, true, self.memory_latency);
        l2_hit_time + self.memory_latency
    }

    /// The level-1 cache a reference of this kind originates in.
    fn origin_mut(&mut self, kind: AccessKind) -> Option<&mut Cache> {
        match kind {
            AccessKind::Instruction => self.icache.as_mut(),
            AccessKind::Data => self.dcache.as_mut(),
        }
    }

    /// Order-only recency refresh of the originating L1.
    fn touch_origin(&mut self, addr: u32, kind: AccessKind) {
        if let Some(l1) = self.origin_mut(kind) {
            l1.touch(addr);
        }
    }

    /// Installs the block into the originating L1 after an L2 fill.
    ///
    /// An L1 line displaced here needs no further handling: inclusion only
    /// couples L2 evictions downward, and nothing is written back.
    fn fill_origin(&mut self, addr: u32, kind: AccessKind) {
        if let Some(l1) = self.origin_mut(kind) {
            let _ = l1.install(addr);
        }
    }
}
