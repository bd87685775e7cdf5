//! Search command implementation.
//!
//! Finds a byte pattern in the file and dumps the bytes starting at the
//! match. A miss is an expected outcome, reported on stdout with its own
//! exit code rather than as an error.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use bingrok_core::config::search::MATCH_WINDOW;
use bingrok_core::present::write_hex_dump;
use bingrok_core::{Diagnostics, DumpLayout, SearchRequest, SliceLength};
use tracing::debug;

use super::Outcome;
use crate::cli_utils::open_source;

/// Run the search command
pub fn run<W: Write, D: Diagnostics>(
    path: &Path,
    request: &SearchRequest,
    layout: &DumpLayout,
    diagnostics: &mut D,
    out: &mut W,
) -> Result<Outcome> {
    let mut reader = open_source(path)?;

    let offset = match reader.search_with(request, diagnostics) {
        Ok(offset) => offset,
        Err(e) if e.is_end_of_data() => {
            debug!("Search ended: {}", e);
            writeln!(out, "Bytes not found.")?;
            return Ok(Outcome::NotFound);
        }
        Err(e) => return Err(e.into()),
    };

    writeln!(out, "Found at ({}).", offset)?;
    writeln!(out)?;

    let window =
        reader.read_slice_with(offset, SliceLength::Explicit(MATCH_WINDOW), diagnostics)?;
    write_hex_dump(out, offset, &window, layout)?;

    Ok(Outcome::Success)
}
