//! Set-Associative Cache.
//!
//! This module implements one configurable set-associative cache level with
//! LRU replacement. It models block presence and recency only; there are no
//! data values, dirty bits, or write-back penalties.
//!
//! Recency is kept as a per-line rank: 0 is most recently used and
//! `assoc - 1` least recently used. Among the valid lines of a set the ranks
//! always form a dense permutation, so the victim of a full set is simply
//! the line at the maximum rank and no per-set access list is needed. All
//! operations are O(assoc), which is acceptable at hardware-realistic
//! associativities.

use crate::common::addr::Geometry;
use crate::config::LevelConfig;

/// One line slot: validity, identifying tag, and recency rank.
///
/// The set index is stored alongside the tag so the full block address can
/// be reconstructed when the line is displaced. An invalid line keeps a
/// stale rank, which every scan ignores.
#[derive(Clone, Copy, Debug, Default)]
struct CacheLine {
    valid: bool,
    tag: u32,
    set_index: u32,
    lru_rank: u32,
}

/// Set-associative cache level with rank-based LRU replacement.
///
/// Lines are stored set-major in a flat vector: the lines of set `s` occupy
/// `s * assoc .. (s + 1) * assoc`.
#[derive(Debug)]
pub struct Cache {
    geometry: Geometry,
    hit_time: u64,
    assoc: u32,
    lines: Vec<CacheLine>,
}

impl Cache {
    /// Creates a cache level from its validated configuration.
    ///
    /// All lines start invalid, with ranks seeded to the way order so each
    /// set begins with a dense rank permutation.
    ///
    /// # Arguments
    ///
    /// * `config` - Level geometry; `sets` must be nonzero here (a zero-set
    ///   level is represented by not constructing a cache at all).
    /// * `block_size` - Block size in bytes, shared across the hierarchy.
    pub fn new(config: &LevelConfig, block_size: u32) -> Self {
        let total = (config.sets as usize) * (config.assoc as usize);
        let mut lines = vec![CacheLine::default(); total];
        for (i, line) in lines.iter_mut().enumerate() {
            line.lru_rank = (i % config.assoc as usize) as u32;
        }
        Self {
            geometry: Geometry::new(config.sets, block_size),
            hit_time: config.hit_time,
            assoc: config.assoc,
            lines,
        }
    }

    /// Access latency in cycles on a hit at this level.
    pub fn hit_time(&self) -> u64 {
        self.hit_time
    }

    /// The tag/index/offset geometry of this cache.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Looks up an address and promotes it on a hit.
    ///
    /// On a hit, every valid line in the set ranked more recent than the hit
    /// line moves one step toward LRU and the hit line becomes rank 0. A
    /// miss leaves the set untouched. Tags and validity never change here.
    ///
    /// # Returns
    ///
    /// `true` if the block is resident.
    pub fn lookup(&mut self, addr: u32) -> bool {
        let tag = self.geometry.tag(addr);
        let base = self.set_base(addr);
        let hit_way = (0..self.assoc as usize).find(|&way| {
            let line = &self.lines[base + way];
            line.valid && line.tag == tag
        });
        match hit_way {
            Some(way) => {
                self.promote(base, way);
                true
            }
            None => false,
        }
    }

    /// Refreshes the recency of a block assumed resident.
    ///
    /// Identical to [`Cache::lookup`] ordering-wise, but the outcome is
    /// deliberately discarded: if the block is absent nothing happens.
    /// Occupancy and validity never change, which is what the hierarchy
    /// relies on when it refreshes an L1 after an L2 hit.
    pub fn touch(&mut self, addr: u32) {
        let _ = self.lookup(addr);
    }

    /// Installs the block for `addr`, evicting if necessary.
    ///
    /// The victim slot is the first invalid line of the set; only when the
    /// set is full is the rank-`assoc - 1` line displaced. Every other
    /// valid line moves one step toward LRU and the new block enters at
    /// rank 0.
    ///
    /// # Returns
    ///
    /// The reconstructed block-aligned address of a displaced valid line,
    /// or `None` when an invalid slot absorbed the fill.
    pub fn install(&mut self, addr: u32) -> Option<u32> {
        let tag = self.geometry.tag(addr);
        let set_index = self.geometry.index(addr);
        let base = self.set_base(addr);
        let assoc = self.assoc as usize;

        let way = (0..assoc)
            .find(|&way| !self.lines[base + way].valid)
            .or_else(|| (0..assoc).find(|&way| self.lines[base + way].lru_rank == self.assoc - 1))
            .unwrap_or(assoc - 1);

        let victim = self.lines[base + way];
        let displaced = victim
            .valid
            .then(|| self.geometry.reconstruct(victim.set_index, victim.tag));

        let max_rank = self.assoc - 1;
        for other in 0..assoc {
            let line = &mut self.lines[base + other];
            if line.valid && line.lru_rank < max_rank {
                line.lru_rank += 1;
            }
        }
        self.lines[base + way] = CacheLine {
            valid: true,
            tag,
            set_index,
            lru_rank: 0,
        };

        displaced
    }

    /// Invalidates the line holding `addr`'s block, if resident.
    ///
    /// Driven by the inclusion rule from outside this cache; the line's
    /// stale rank stays behind and is ignored until the slot refills.
    pub fn invalidate(&mut self, addr: u32) {
        let tag = self.geometry.tag(addr);
        let base = self.set_base(addr);
        for way in 0..self.assoc as usize {
            let line = &mut self.lines[base + way];
            if line.valid && line.tag == tag {
                line.valid = false;
                return;
            }
        }
    }

    /// Whether the block for `addr` is resident, without touching recency.
    pub fn contains(&self, addr: u32) -> bool {
        let tag = self.geometry.tag(addr);
        let base = self.set_base(addr);
        (0..self.assoc as usize).any(|way| {
            let line = &self.lines[base + way];
            line.valid && line.tag == tag
        })
    }

    /// Block-aligned addresses of every resident block.
    ///
    /// Diagnostic view used by invariant checks; iteration order is
    /// unspecified.
    pub fn resident(&self) -> impl Iterator<Item = u32> + '_ {
        self.lines
            .iter()
            .filter(|line| line.valid)
            .map(|line| self.geometry.reconstruct(line.set_index, line.tag))
    }

    /// Index of the first line of `addr`'s set in the flat line vector.
    fn set_base(&self, addr: u32) -> usize {
        (self.geometry.index(addr) as usize) * (self.assoc as usize)
    }

    /// Moves the line at `way` to rank 0, shifting more-recent lines back.
    fn promote(&mut self, base: usize, way: usize) {
        let old_rank = self.lines[base + way].lru_rank;
        for other in 0..self.assoc as usize {
            let line = &mut self.lines[base + other];
            if line.valid && line.lru_rank < old_rank {
                line.lru_rank += 1;
            }
        }
        self.lines[base + way].lru_rank = 0;
    }
}
