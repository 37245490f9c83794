//! Configuration and trace input errors.
//!
//! This module defines the two fatal error kinds the simulator can raise. It provides:
//! 1. **Configuration Errors:** Degenerate geometry detected once at initialization.
//! 2. **Trace Errors:** Unreadable or malformed trace input during replay setup.
//!
//! Once a hierarchy is constructed from a validated configuration, access
//! processing itself is infallible: every well-formed reference completes and
//! returns a latency.

use thiserror::Error;

use super::data::LevelId;

/// A configuration rejected at initialization.
///
/// Raised exactly once, before any access is processed; never mid-run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Block size is zero or not a power of two.
    #[error("block size must be a nonzero power of two, got {0}")]
    BlockSize(u32),

    /// A present level has a non-power-of-two set count.
    ///
    /// A set count of zero is not an error: it disables the level.
    #[error("{level} cache: set count must be zero or a power of two, got {sets}")]
    Sets {
        /// Level the bad set count was configured for.
        level: LevelId,
        /// The rejected set count.
        sets: u32,
    },

    /// A present level has a zero or non-power-of-two associativity.
    #[error("{level} cache: associativity must be a nonzero power of two, got {assoc}")]
    Associativity {
        /// Level the bad associativity was configured for.
        level: LevelId,
        /// The rejected associativity.
        assoc: u32,
    },

    /// Index and offset bits consume the whole 32-bit address.
    #[error(
        "{level} cache: {index_bits} index bits and {offset_bits} offset bits \
         leave no tag bits in a 32-bit address"
    )]
    NoTagBits {
        /// Level whose geometry overflows the address width.
        level: LevelId,
        /// Derived set-index bit count.
        index_bits: u32,
        /// Derived block-offset bit count.
        offset_bits: u32,
    },
}

/// A trace file that could not be read or parsed.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened or read.
    #[error("could not read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A line did not split into an access kind and an address.
    #[error("trace line {line}: expected '<I|D> <hex address>'")]
    Malformed {
        /// 1-based line number in the trace input.
        line: usize,
    },

    /// The access-kind token was neither `I` nor `D`.
    #[error("trace line {line}: unknown access kind '{token}' (expected 'I' or 'D')")]
    Kind {
        /// 1-based line number in the trace input.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// The address token was not a 32-bit hexadecimal number.
    #[error("trace line {line}: bad address '{token}'")]
    Address {
        /// 1-based line number in the trace input.
        line: usize,
        /// The offending token.
        token: String,
    },
}
