//! CLI argument definitions for bingrok.

use std::path::PathBuf;

use anyhow::{Result, bail};
use bingrok_core::config::dump;
use bingrok_core::{
    DumpLayout, FieldLayout, FormatDescriptor, Pattern, SearchRequest, UnpackOptions,
};
use clap::Parser;

use crate::cli_utils::parse_offset;
use crate::commands::dump::DumpRequest;
use crate::commands::unpack::UnpackRequest;

#[derive(Parser)]
#[command(name = "bingrok")]
#[command(about = "Browse binary data by iteratively seeking and unpacking", version)]
pub struct Args {
    /// File to inspect
    pub filepath: PathBuf,

    /// Search for a byte sequence (hex, e.g. `ff 7f`)
    #[arg(
        long,
        num_args = 1..,
        value_name = "HEX",
        conflicts_with_all = ["offsets", "unpack_format", "length"]
    )]
    pub search_bytes: Option<Vec<String>>,

    /// Skip this many leading bytes before searching
    #[arg(long, default_value = "0", value_parser = parse_offset)]
    pub search_start_offset: u64,

    /// Number of leading matches to skip
    #[arg(long, default_value_t = 0)]
    pub search_skip_count: u64,

    /// Only search the first N bytes of the file
    #[arg(long, value_parser = parse_offset)]
    pub search_max_bytes: Option<u64>,

    /// Offset to read from (decimal or 0x-prefixed hex, repeatable)
    #[arg(short = 'o', long = "offset", value_name = "OFFSET", value_parser = parse_offset)]
    pub offsets: Vec<u64>,

    /// Colon-separated unpack format (e.g. `<I:4c:>h`)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub unpack_format: Option<String>,

    /// Number of bytes to read (defaults to the unpack format's size)
    #[arg(short = 'l', long)]
    pub length: Option<usize>,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Show char arrays as a list of hex strings instead of one string
    #[arg(long)]
    pub raw_chars: bool,

    /// Bytes per hex dump line
    #[arg(long, env = "BINGROK_WRAP_BYTE_COUNT", default_value_t = dump::WRAP_BYTE_COUNT)]
    pub wrap_byte_count: usize,

    /// Bytes per group within a hex dump line
    #[arg(long, env = "BINGROK_SEP_BYTE_COUNT", default_value_t = dump::SEP_BYTE_COUNT)]
    pub sep_byte_count: usize,

    /// Trace search and read steps to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Listing style for unpacked fields (mutually exclusive)
#[derive(clap::Args, Debug, Default)]
#[group(multiple = false)]
pub struct LayoutArgs {
    /// One line per offset (default)
    #[arg(long)]
    pub inline: bool,

    /// One indented line per field
    #[arg(long)]
    pub itemized: bool,

    /// JSON list of [format, value] pairs
    #[arg(long)]
    pub json: bool,
}

impl LayoutArgs {
    pub fn field_layout(&self) -> FieldLayout {
        if self.json {
            FieldLayout::Json
        } else if self.itemized {
            FieldLayout::Itemized
        } else {
            FieldLayout::Inline
        }
    }
}

/// What a single invocation does. Only the modes that print a hex dump carry
/// a `DumpLayout`.
pub enum Mode {
    Search(SearchRequest, DumpLayout),
    Unpack(UnpackRequest),
    Dump(DumpRequest, DumpLayout),
}

impl Args {
    /// Resolve the request. Patterns and formats are validated here, before the
    /// file is opened.
    pub fn mode(&self) -> Result<Mode> {
        if let Some(tokens) = &self.search_bytes {
            let pattern = Pattern::from_hex_tokens(tokens)?;
            let request = SearchRequest::new(pattern)
                .start_offset(self.search_start_offset)
                .skip_count(self.search_skip_count)
                .max_bytes(self.search_max_bytes);
            return Ok(Mode::Search(request, self.dump_layout()?));
        }

        if self.offsets.is_empty() {
            bail!("an --offset is required unless --search-bytes is given");
        }

        if let Some(format) = &self.unpack_format {
            let descriptor = FormatDescriptor::parse(format)?;
            return Ok(Mode::Unpack(UnpackRequest {
                offsets: self.offsets.clone(),
                descriptor,
                length: self.length,
                layout: self.layout.field_layout(),
                options: UnpackOptions {
                    make_nicer: !self.raw_chars,
                },
            }));
        }

        match self.length {
            Some(length) => Ok(Mode::Dump(
                DumpRequest {
                    offsets: self.offsets.clone(),
                    length,
                },
                self.dump_layout()?,
            )),
            None => bail!("either --unpack-format or --length is required with --offset"),
        }
    }

    fn dump_layout(&self) -> Result<DumpLayout> {
        Ok(DumpLayout::new(self.wrap_byte_count, self.sep_byte_count)?)
    }
}
