//! Common CLI utility functions shared across commands.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use bingrok_core::SourceReader;

/// Open the file under inspection, read-only.
pub fn open_source(path: &Path) -> Result<SourceReader<BufReader<File>>> {
    SourceReader::open(path).with_context(|| format!("Failed to open {:?}", path))
}

/// Parse an offset as decimal or `0x`-prefixed hex.
pub fn parse_offset(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|e| format!("Invalid offset {:?}: {}", s, e))
}
