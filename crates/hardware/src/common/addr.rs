//! Address geometry for set-associative caches.
//!
//! This module defines the stateless mapping between a 32-bit address and a
//! cache's (set index, tag) coordinates. It provides the following:
//! 1. **Decomposition:** Extracting the set index and tag from an address.
//! 2. **Reconstruction:** Recovering the block-aligned address of a resident line.
//! 3. **Bit Accounting:** Derived offset/index/tag widths for a given geometry.
//!
//! A `Geometry` is derived once per cache from its set count and block size
//! and is shared by every lookup against that cache.

/// Width of the simulated address space in bits.
const ADDR_BITS: u32 = u32::BITS;

/// Tag/index/offset split of a 32-bit address for one cache geometry.
///
/// Addresses decompose as `[ tag | set index | block offset ]`, where the
/// offset covers `log2(block_size)` bits and the index `log2(num_sets)` bits.
/// Construction requires `num_sets` and `block_size` to be powers of two
/// whose combined index/offset widths leave at least one tag bit; the
/// configuration validator rejects anything else before a `Geometry` is
/// built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    offset_bits: u32,
    index_bits: u32,
}

impl Geometry {
    /// Derives the geometry for a cache with `num_sets` sets of
    /// `block_size`-byte blocks.
    ///
    /// # Arguments
    ///
    /// * `num_sets` - Number of sets; must be a power of two.
    /// * `block_size` - Block size in bytes; must be a power of two.
    pub fn new(num_sets: u32, block_size: u32) -> Self {
        debug_assert!(block_size.is_power_of_two());
        debug_assert!(num_sets.is_power_of_two());
        let geometry = Self {
            offset_bits: block_size.trailing_zeros(),
            index_bits: num_sets.trailing_zeros(),
        };
        debug_assert!(geometry.offset_bits + geometry.index_bits < ADDR_BITS);
        geometry
    }

    /// Extracts the set index from an address.
    #[inline]
    pub fn index(&self, addr: u32) -> u32 {
        (addr >> self.offset_bits) & ((1 << self.index_bits) - 1)
    }

    /// Extracts the tag from an address.
    #[inline]
    pub fn tag(&self, addr: u32) -> u32 {
        addr >> (self.offset_bits + self.index_bits)
    }

    /// Reconstructs the block-aligned address of a line from its set index
    /// and tag.
    ///
    /// The offset bits of the result are zero. Only the index and tag of the
    /// reconstructed address are meaningful downstream, which is exactly what
    /// eviction propagation needs.
    #[inline]
    pub fn reconstruct(&self, set_index: u32, tag: u32) -> u32 {
        (tag << (self.index_bits + self.offset_bits)) | (set_index << self.offset_bits)
    }

    /// Number of block-offset bits (`log2(block_size)`).
    pub fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Number of set-index bits (`log2(num_sets)`).
    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Number of tag bits remaining above index and offset.
    pub fn tag_bits(&self) -> u32 {
        ADDR_BITS - self.index_bits - self.offset_bits
    }
}
