//! Trace replay.
//!
//! Provides the trace-file parser and the driver that feeds parsed
//! references through a cache hierarchy one at a time.

/// Trace record type and line parser.
pub mod trace;

/// Replay driver accumulating totals over a trace.
pub mod simulator;

pub use simulator::Simulator;
pub use trace::{TraceReader, TraceRecord};
