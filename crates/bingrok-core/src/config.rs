//! Default layout and search constants.
//!
//! - Hex dump geometry (`dump`)
//! - Search output window (`search`)
//! - `DumpLayout`, the validated pair of dump widths

use crate::error::{Error, Result};

/// Hex dump geometry.
pub mod dump {
    /// Bytes printed per dump line before wrapping to a new offset label.
    pub const WRAP_BYTE_COUNT: usize = 16;

    /// Bytes per visual group within a line.
    pub const SEP_BYTE_COUNT: usize = 8;
}

/// Search output configuration.
pub mod search {
    /// Bytes dumped starting at a match.
    pub const MATCH_WINDOW: usize = 16;
}

/// Line width and grouping for hex dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpLayout {
    pub wrap_byte_count: usize,
    pub sep_byte_count: usize,
}

impl Default for DumpLayout {
    fn default() -> Self {
        Self {
            wrap_byte_count: dump::WRAP_BYTE_COUNT,
            sep_byte_count: dump::SEP_BYTE_COUNT,
        }
    }
}

impl DumpLayout {
    pub fn new(wrap_byte_count: usize, sep_byte_count: usize) -> Result<Self> {
        if wrap_byte_count == 0 {
            return Err(Error::precondition("wrap byte count must be at least 1"));
        }
        if sep_byte_count == 0 {
            return Err(Error::precondition("separator byte count must be at least 1"));
        }
        Ok(Self {
            wrap_byte_count,
            sep_byte_count,
        })
    }
}
