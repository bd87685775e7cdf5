//! Field listings for unpacked records.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use strum::{Display, EnumString};

use crate::error::Result;
use crate::unpack::UnpackRecord;

/// How unpacked records are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum FieldLayout {
    /// One line per offset.
    #[default]
    Inline,
    /// Offset line, then one indented line per record.
    Itemized,
    /// Pretty-printed JSON list of `[format, value]` pairs.
    Json,
}

impl FieldLayout {
    pub fn render(self, offset: u64, records: &[UnpackRecord]) -> Result<String> {
        match self {
            FieldLayout::Inline => Ok(render_inline(offset, records)),
            FieldLayout::Itemized => Ok(render_itemized(offset, records)),
            FieldLayout::Json => render_json(records),
        }
    }
}

/// `0000002a: [<I] [258], [2c] [ff d8]`
pub fn render_inline(offset: u64, records: &[UnpackRecord]) -> String {
    let phrase = records
        .iter()
        .map(|record| format!("[{}] [{}]", record.format, record.value))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{:08x}: {}", offset, phrase)
}

pub fn render_itemized(offset: u64, records: &[UnpackRecord]) -> String {
    let mut lines = vec![format!("{:08x}", offset)];
    lines.extend(
        records
            .iter()
            .enumerate()
            .map(|(i, record)| format!("  {}: [{}] [{}]", i, record.format, record.value)),
    );
    lines.join("\n")
}

/// Render `(format, value)` pairs as 4-space indented JSON. The distilled type
/// is not included.
pub fn render_json(records: &[UnpackRecord]) -> Result<String> {
    let pairs: Vec<_> = records
        .iter()
        .map(|record| (record.format.as_str(), &record.value))
        .collect();

    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    pairs.serialize(&mut serializer)?;

    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}
