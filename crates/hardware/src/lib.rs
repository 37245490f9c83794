//! Trace-driven cache hierarchy simulator library.
//!
//! This crate models a two-level cache hierarchy with the following:
//! 1. **Hierarchy:** Split L1 instruction/data caches over a shared, optionally inclusive L2.
//! 2. **Caches:** Set-associative stores with rank-based LRU replacement.
//! 3. **Addressing:** Tag/index/offset decomposition of 32-bit addresses per cache geometry.
//! 4. **Simulation:** Trace parsing, reference replay, and access-latency accounting.
//! 5. **Statistics:** Per-level reference/miss/penalty counters and derived metrics.
//!
//! No data values are stored; the model tracks only block presence, recency,
//! and timing.

/// Common types (address geometry, access kinds, error definitions).
pub mod common;
/// Simulator configuration (defaults, per-level geometry, validation).
pub mod config;
/// Cache hierarchy (set-associative cache unit and the multi-level controller).
pub mod core;
/// Trace parsing and replay.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Multi-level cache controller; owns the three caches and the statistics.
pub use crate::core::Hierarchy;
/// Trace replay driver; owns a [`Hierarchy`] and accumulates totals.
pub use crate::sim::Simulator;
/// Per-level statistics snapshot handed to the reporting layer.
pub use crate::stats::Stats;
