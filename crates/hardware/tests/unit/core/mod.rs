//! # Core Unit Tests
//!
//! Tests for the simulation core: the set-associative cache unit, the
//! multi-level hierarchy controller, and the property tests covering both.

/// Unit tests for address geometry and the cache unit.
pub mod cache;
