//! Simulator: replays a reference stream through one cache hierarchy.
//!
//! The simulator owns the hierarchy for one run and keeps the run-level
//! totals (reference count, summed cycles) that the hierarchy itself does
//! not track. Independent runs use independent simulators; no state crosses
//! them.

use crate::common::error::{ConfigError, TraceError};
use crate::config::Config;
use crate::core::hierarchy::Hierarchy;
use crate::sim::trace::TraceRecord;
use crate::stats::Stats;

/// Trace replay driver over one [`Hierarchy`].
#[derive(Debug)]
pub struct Simulator {
    hierarchy: Hierarchy,
    references: u64,
    total_cycles: u64,
}

impl Simulator {
    /// Creates a simulator for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration fails validation.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            hierarchy: Hierarchy::new(config)?,
            references: 0,
            total_cycles: 0,
        })
    }

    /// Processes one trace record and returns its access latency in cycles.
    pub fn step(&mut self, record: &TraceRecord) -> u64 {
        let cycles = self.hierarchy.access(record.addr, record.kind);
        self.references += 1;
        self.total_cycles += cycles;
        cycles
    }

    /// Replays every record of a trace stream.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first [`TraceError`] the stream yields;
    /// records before the error remain accounted for.
    pub fn run<I>(&mut self, records: I) -> Result<(), TraceError>
    where
        I: IntoIterator<Item = Result<TraceRecord, TraceError>>,
    {
        for record in records {
            let _ = self.step(&record?);
        }
        Ok(())
    }

    /// Number of references replayed so far.
    pub fn references(&self) -> u64 {
        self.references
    }

    /// Total access cycles summed over all replayed references.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// The hierarchy being driven.
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Snapshot of the per-level statistics.
    pub fn stats(&self) -> Stats {
        *self.hierarchy.stats()
    }
}
