//! Trace parsing.
//!
//! This module reads address traces in a plain text format: one reference
//! per line, as `<kind> <address>` where the kind is `I` (instruction fetch)
//! or `D` (data access) and the address is 32-bit hexadecimal with an
//! optional `0x` prefix. Blank lines and lines starting with `#` are
//! skipped.
//!
//! Records are produced one at a time; the hierarchy needs no lookahead, so
//! arbitrarily long traces stream in constant memory.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::data::AccessKind;
use crate::common::error::TraceError;

/// One parsed trace reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// The 32-bit byte address referenced.
    pub addr: u32,
    /// Whether the reference is an instruction fetch or a data access.
    pub kind: AccessKind,
}

/// Parses one trace line.
///
/// # Arguments
///
/// * `number` - 1-based line number, used in error reports.
/// * `line` - The raw line text.
///
/// # Returns
///
/// `Ok(None)` for blank and `#`-comment lines, `Ok(Some(record))` for a
/// reference.
///
/// # Errors
///
/// Returns a [`TraceError`] describing the offending line and token when the
/// line does not split into a kind and a hexadecimal address.
pub fn parse_line(number: usize, line: &str) -> Result<Option<TraceRecord>, TraceError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.split_whitespace();
    let (Some(kind_token), Some(addr_token), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(TraceError::Malformed { line: number });
    };
    let kind = match kind_token {
        "I" | "i" => AccessKind::Instruction,
        "D" | "d" => AccessKind::Data,
        _ => {
            return Err(TraceError::Kind {
                line: number,
                token: kind_token.to_string(),
            });
        }
    };
    let digits = addr_token
        .strip_prefix("0x")
        .or_else(|| addr_token.strip_prefix("0X"))
        .unwrap_or(addr_token);
    let addr = u32::from_str_radix(digits, 16).map_err(|_| TraceError::Address {
        line: number,
        token: addr_token.to_string(),
    })?;
    Ok(Some(TraceRecord { addr, kind }))
}

/// Streaming reader yielding one [`TraceRecord`] per trace line.
///
/// Blank and comment lines are skipped silently; malformed lines and I/O
/// failures surface as `Err` items.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    number: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps any buffered reader producing trace text.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            number: 0,
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file for streaming.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] when the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(TraceError::Io(e))),
            };
            self.number += 1;
            match parse_line(self.number, &line) {
                Ok(None) => {}
                Ok(Some(record)) => return Some(Ok(record)),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
