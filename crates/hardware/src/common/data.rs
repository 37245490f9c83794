//! Memory access classification.
//!
//! This module defines how references are categorized as they move through
//! the hierarchy. These types are used for the following:
//! 1. **Routing:** Selecting the level-1 cache (instruction or data) an access enters through.
//! 2. **Statistics Tracking:** Attributing references, misses, and penalties to a level.
//! 3. **Diagnostics:** Labeling configuration errors and report lines per level.

use std::fmt;

/// Classification of one memory reference.
///
/// Each trace record carries exactly one kind, which decides whether the
/// access enters the hierarchy through the instruction or the data cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// Instruction fetch; routed through the L1 instruction cache.
    Instruction,
    /// Data load or store; routed through the L1 data cache.
    Data,
}

impl AccessKind {
    /// The level-1 cache this kind of access originates in.
    pub fn level(self) -> LevelId {
        match self {
            Self::Instruction => LevelId::ICache,
            Self::Data => LevelId::DCache,
        }
    }
}

/// Identifier for one cache level in the hierarchy.
///
/// Used to label statistics counters, configuration errors, and report lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelId {
    /// L1 instruction cache.
    ICache,
    /// L1 data cache.
    DCache,
    /// Shared second-level cache.
    L2,
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ICache => write!(f, "L1-I"),
            Self::DCache => write!(f, "L1-D"),
            Self::L2 => write!(f, "L2"),
        }
    }
}
