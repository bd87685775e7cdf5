//! Unpack command implementation.
//!
//! Reads a slice at each requested offset, unpacks it with the format
//! descriptor and prints the fields in the selected layout.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use bingrok_core::unpack::unpack_with;
use bingrok_core::{Diagnostics, FieldLayout, FormatDescriptor, SliceLength, UnpackOptions};

use super::Outcome;
use crate::cli_utils::open_source;

pub struct UnpackRequest {
    pub offsets: Vec<u64>,
    pub descriptor: FormatDescriptor,
    /// Bytes to read; the descriptor's size when `None`.
    pub length: Option<usize>,
    pub layout: FieldLayout,
    pub options: UnpackOptions,
}

/// Run the unpack command
pub fn run<W: Write, D: Diagnostics>(
    path: &Path,
    request: &UnpackRequest,
    diagnostics: &mut D,
    out: &mut W,
) -> Result<Outcome> {
    let mut reader = open_source(path)?;
    let length = match request.length {
        Some(length) => SliceLength::Explicit(length),
        None => SliceLength::Format(&request.descriptor),
    };

    for &offset in &request.offsets {
        let bytes = reader.read_slice_with(offset, length, diagnostics)?;
        let records = unpack_with(&bytes, &request.descriptor, request.options)
            .with_context(|| format!("Failed to unpack at offset {:#x}", offset))?;

        writeln!(out, "{}", request.layout.render(offset, &records)?)?;
    }

    Ok(Outcome::Success)
}
