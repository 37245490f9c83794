//! Set-Associative Cache Unit Tests.
//!
//! Verifies address geometry arithmetic and the cache unit's behavior:
//! hit/miss classification, rank-based LRU promotion, victim selection,
//! order-only touches, and inclusion-driven invalidation.
//!
//! The cache is constructed directly from a `LevelConfig` — no hierarchy
//! needed.

use std::collections::HashSet;

use rstest::rstest;

use memsim_core::common::addr::Geometry;
use memsim_core::config::LevelConfig;
use memsim_core::core::cache::Cache;

// ──────────────────────────────────────────────────────────
// Helper: build a small test cache
// ──────────────────────────────────────────────────────────

/// Creates a small, deterministic test cache with 64-byte blocks and a
/// 1-cycle hit time.
///
/// With `sets = 1`, every address maps to the same set and the tag is
/// `addr / 64`, so `0`, `64`, `128`, ... are distinct blocks competing for
/// the same ways.
fn cache(sets: u32, assoc: u32) -> Cache {
    Cache::new(
        &LevelConfig {
            sets,
            assoc,
            hit_time: 1,
        },
        64,
    )
}

/// Resident blocks as a set, for occupancy comparisons.
fn occupancy(cache: &Cache) -> HashSet<u32> {
    cache.resident().collect()
}

// ══════════════════════════════════════════════════════════
// 1. Address Geometry
// ══════════════════════════════════════════════════════════

/// Hand-checked decomposition of a known address.
///
/// 16 sets of 64-byte blocks: 6 offset bits, 4 index bits, 22 tag bits.
/// For `0x1234_5678`: index = (addr >> 6) & 0xF = 9, tag = addr >> 10.
#[test]
fn geometry_decomposes_known_address() {
    let geometry = Geometry::new(16, 64);
    assert_eq!(geometry.offset_bits(), 6);
    assert_eq!(geometry.index_bits(), 4);
    assert_eq!(geometry.tag_bits(), 22);

    let addr = 0x1234_5678;
    assert_eq!(geometry.index(addr), 9);
    assert_eq!(geometry.tag(addr), 0x0004_8D15);
}

/// Reconstruction inverts decomposition up to block alignment.
#[rstest]
#[case(1, 64)]
#[case(16, 64)]
#[case(1024, 32)]
#[case(1, 1)]
#[case(4096, 128)]
fn geometry_reconstruct_is_block_aligned_inverse(#[case] sets: u32, #[case] block: u32) {
    let geometry = Geometry::new(sets, block);
    for addr in [0, 0x40, 0x1234_5678, 0xDEAD_BEEF, u32::MAX] {
        let rebuilt = geometry.reconstruct(geometry.index(addr), geometry.tag(addr));
        assert_eq!(rebuilt, addr & !(block - 1));
    }
}

// ══════════════════════════════════════════════════════════
// 2. Cold Miss / Warm Hit
// ══════════════════════════════════════════════════════════

/// First access to any address is a compulsory (cold) miss; installing it
/// into an empty set displaces nothing.
#[test]
fn cold_miss_then_warm_hit() {
    let mut cache = cache(2, 2);

    assert!(!cache.lookup(0x1000), "first access should miss");
    assert_eq!(cache.install(0x1000), None, "cold fill displaces nothing");
    assert!(cache.lookup(0x1000), "second access should hit");
}

/// A lookup never installs: a missed block stays absent.
#[test]
fn lookup_does_not_install() {
    let mut cache = cache(2, 2);

    assert!(!cache.lookup(0x2000));
    assert!(!cache.contains(0x2000), "miss must not change occupancy");
}

/// Accesses to different offsets within one 64-byte block hit the same line.
#[test]
fn same_block_different_offset_hits() {
    let mut cache = cache(2, 2);

    let _ = cache.install(0x1000);
    assert!(cache.lookup(0x1000 + 32), "same block should hit");
    assert!(!cache.lookup(0x1000 + 64), "next block should miss");
}

// ══════════════════════════════════════════════════════════
// 3. LRU Ordering and Eviction
// ══════════════════════════════════════════════════════════

/// The victim of a full set is the line referenced longest ago, counting
/// both hit promotions and fills.
#[test]
fn eviction_picks_least_recently_used() {
    let mut cache = cache(1, 2);

    let _ = cache.install(0); // blocks 0 and 64 fill both ways
    let _ = cache.install(64);
    assert!(cache.lookup(0), "promote block 0 to most recent");

    // Block 64 is now least recently used and must be the one displaced.
    assert_eq!(cache.install(128), Some(64));
    assert!(cache.contains(0));
    assert!(!cache.contains(64));
    assert!(cache.contains(128));
}

/// Fills alone order the set by insertion recency.
#[test]
fn fill_order_is_recency_order() {
    let mut cache = cache(1, 4);

    for addr in [0, 64, 128, 192] {
        let _ = cache.install(addr);
    }
    // Oldest fill goes first, then the next-oldest.
    assert_eq!(cache.install(256), Some(0));
    assert_eq!(cache.install(320), Some(64));
}

/// An invalid slot always absorbs a fill before any valid line is evicted.
#[test]
fn invalid_slot_preferred_over_eviction() {
    let mut cache = cache(1, 2);

    let _ = cache.install(0);
    let _ = cache.install(64);
    cache.invalidate(0);

    assert_eq!(cache.install(128), None, "freed slot absorbs the fill");
    assert!(cache.contains(64), "valid line survives");
    assert!(cache.contains(128));
}

// ══════════════════════════════════════════════════════════
// 4. Order-Only Touch
// ══════════════════════════════════════════════════════════

/// Touching an absent block changes nothing.
#[test]
fn touch_of_absent_block_is_noop() {
    let mut cache = cache(1, 2);

    let _ = cache.install(0);
    let _ = cache.install(64);
    let before = occupancy(&cache);

    cache.touch(128);

    assert_eq!(occupancy(&cache), before);
    assert!(!cache.contains(128));
}

/// Touching a resident block refreshes its recency without refilling.
#[test]
fn touch_reorders_residents() {
    let mut cache = cache(1, 2);

    let _ = cache.install(0);
    let _ = cache.install(64);
    cache.touch(0);

    // Block 64 became least recently used through the touch alone.
    assert_eq!(cache.install(128), Some(64));
}

// ══════════════════════════════════════════════════════════
// 5. Invalidation
// ══════════════════════════════════════════════════════════

/// Invalidation removes exactly the matching block.
#[test]
fn invalidate_removes_block() {
    let mut cache = cache(2, 2);

    let _ = cache.install(0x1000);
    let _ = cache.install(0x2000);
    cache.invalidate(0x1000);

    assert!(!cache.contains(0x1000));
    assert!(cache.contains(0x2000));
    assert!(!cache.lookup(0x1000), "invalidated block misses");
}

/// Invalidating an absent block is a no-op.
#[test]
fn invalidate_of_absent_block_is_noop() {
    let mut cache = cache(2, 2);

    let _ = cache.install(0x1000);
    let before = occupancy(&cache);

    cache.invalidate(0x3000);

    assert_eq!(occupancy(&cache), before);
}

// ══════════════════════════════════════════════════════════
// 6. Residency Reporting
// ══════════════════════════════════════════════════════════

/// Resident blocks report block-aligned addresses.
#[test]
fn resident_reports_block_aligned_addresses() {
    let mut cache = cache(4, 2);

    let _ = cache.install(0x1010); // offset within the 0x1000 block
    let _ = cache.install(0x2038);

    assert_eq!(occupancy(&cache), HashSet::from([0x1000, 0x2000]));
}

/// Repeating a hit is idempotent on occupancy.
#[test]
fn repeated_hits_leave_occupancy_unchanged() {
    let mut cache = cache(1, 2);

    let _ = cache.install(0);
    let _ = cache.install(64);
    let before = occupancy(&cache);

    for _ in 0..3 {
        assert!(cache.lookup(64));
        assert_eq!(occupancy(&cache), before);
    }
}
