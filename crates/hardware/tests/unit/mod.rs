//! # Unit Components
//!
//! This module serves as the central hub for the simulator's unit tests. It
//! organizes the test suites for configuration, the cache hierarchy core,
//! trace replay, and statistics collection.

/// Unit tests for configuration defaults, deserialization, and validation.
pub mod config;

/// Unit tests for the cache hierarchy core.
///
/// This module aggregates tests for:
/// - Address geometry and the set-associative cache unit.
/// - The multi-level access protocol and inclusion handling.
/// - Property tests pinning down LRU and inclusion invariants.
pub mod core;
