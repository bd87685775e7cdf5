//! Dump command implementation.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use bingrok_core::present::write_hex_dump;
use bingrok_core::{Diagnostics, DumpLayout, SliceLength};
use tracing::warn;

use super::Outcome;
use crate::cli_utils::open_source;

pub struct DumpRequest {
    pub offsets: Vec<u64>,
    pub length: usize,
}

/// Run the dump command
pub fn run<W: Write, D: Diagnostics>(
    path: &Path,
    request: &DumpRequest,
    layout: &DumpLayout,
    diagnostics: &mut D,
    out: &mut W,
) -> Result<Outcome> {
    let mut reader = open_source(path)?;

    for &offset in &request.offsets {
        let bytes =
            reader.read_slice_with(offset, SliceLength::Explicit(request.length), diagnostics)?;
        if bytes.len() < request.length {
            warn!(
                "Short read at offset {:#x}: {} of {} bytes",
                offset,
                bytes.len(),
                request.length
            );
        }
        write_hex_dump(out, offset, &bytes, layout)?;
    }

    Ok(Outcome::Success)
}
