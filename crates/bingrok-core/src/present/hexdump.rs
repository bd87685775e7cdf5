//! Hex dumps of raw byte ranges.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::config::DumpLayout;

/// Format `bytes` as dump lines, without line terminators.
///
/// Each line is the 8-digit hex offset, a space, then ` xx` per byte, with one
/// extra space after every `sep_byte_count` bytes within the line. A new line
/// (and offset label) starts every `wrap_byte_count` bytes. An empty buffer
/// yields no lines, and a buffer that fills its last line exactly does not
/// produce a trailing label-only line.
///
/// # Example
///
/// ```
/// use bingrok_core::config::DumpLayout;
/// use bingrok_core::present::hex_dump_lines;
///
/// let lines = hex_dump_lines(0x10, &[0xff, 0xd8, 0xff], &DumpLayout::default());
/// assert_eq!(lines, vec!["00000010  ff d8 ff"]);
/// ```
pub fn hex_dump_lines(offset: u64, bytes: &[u8], layout: &DumpLayout) -> Vec<String> {
    bytes
        .chunks(layout.wrap_byte_count)
        .enumerate()
        .map(|(row, chunk)| {
            let row_offset = offset + (row * layout.wrap_byte_count) as u64;
            let mut line = format!("{:08x} ", row_offset);
            for (i, byte) in chunk.iter().enumerate() {
                if i > 0 && i % layout.sep_byte_count == 0 {
                    line.push(' ');
                }
                // Writing into a String cannot fail.
                let _ = write!(line, " {:02x}", byte);
            }
            line
        })
        .collect()
}

/// Write a hex dump, one newline-terminated line per row.
pub fn write_hex_dump<W: Write>(
    out: &mut W,
    offset: u64,
    bytes: &[u8],
    layout: &DumpLayout,
) -> io::Result<()> {
    for line in hex_dump_lines(offset, bytes, layout) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// The full dump as a string, every line newline-terminated.
pub fn format_hex_dump(offset: u64, bytes: &[u8], layout: &DumpLayout) -> String {
    hex_dump_lines(offset, bytes, layout)
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}
