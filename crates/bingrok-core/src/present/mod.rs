//! Terminal rendering
//!
//! - Field listings for unpacked records (`FieldLayout`: inline, itemized, JSON)
//! - Wrapped, grouped hex dumps of raw byte ranges

mod fields;
mod hexdump;

pub use fields::{FieldLayout, render_inline, render_itemized, render_json};
pub use hexdump::{format_hex_dump, hex_dump_lines, write_hex_dump};
