//! Format-driven unpacking of byte slices.
//!
//! A descriptor such as `<I:4c:>h` is split into parts; each part is decoded
//! from the next bytes of the buffer and "distilled" to its bare type code,
//! which drives type-specific rendering (char arrays become hex).

mod format;
mod value;

use crate::error::{Error, Result};

pub use format::{
    ByteOrder, FormatDescriptor, FormatPart, Kind, PART_DELIMITER, distill_part_format,
};
pub use value::{FieldValue, Scalar, UnpackRecord};

/// Rendering choices for unpacked values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackOptions {
    /// Render char arrays as one space-joined hex string instead of a list.
    pub make_nicer: bool,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        Self { make_nicer: true }
    }
}

/// Unpack `buffer` with default options.
///
/// # Example
///
/// ```
/// use bingrok_core::unpack::{unpack, FieldValue, FormatDescriptor, Scalar};
///
/// let descriptor: FormatDescriptor = "<H:2c".parse().unwrap();
/// let records = unpack(&[0x02, 0x01, 0xff, 0xd8], &descriptor).unwrap();
///
/// assert_eq!(records[0].value, FieldValue::Values(vec![Scalar::UInt(0x0102)]));
/// assert_eq!(records[1].value, FieldValue::HexText("ff d8".to_string()));
/// ```
pub fn unpack(buffer: &[u8], descriptor: &FormatDescriptor) -> Result<Vec<UnpackRecord>> {
    unpack_with(buffer, descriptor, UnpackOptions::default())
}

/// Unpack each part of `descriptor` from successive positions of `buffer`.
///
/// # Errors
///
/// Returns a decode error when the buffer is too short for a part.
pub fn unpack_with(
    buffer: &[u8],
    descriptor: &FormatDescriptor,
    options: UnpackOptions,
) -> Result<Vec<UnpackRecord>> {
    let mut records = Vec::with_capacity(descriptor.parts().len());
    let mut offset = 0usize;

    for part in descriptor.parts() {
        let bytes = offset
            .checked_add(part.size())
            .and_then(|end| buffer.get(offset..end))
            .ok_or_else(|| {
                Error::decode(
                    part.raw(),
                    format!(
                        "unpack requires a buffer of at least {} bytes at offset {}, {} available",
                        part.size(),
                        offset,
                        buffer.len().saturating_sub(offset)
                    ),
                )
            })?;

        let distilled = part.distilled();
        let value = distill_values(distilled, part.decode(bytes), options);

        records.push(UnpackRecord {
            format: part.raw().to_string(),
            distilled: distilled.to_string(),
            value,
        });
        offset += part.size();
    }

    Ok(records)
}

/// Type-specific post-processing keyed on the distilled type code.
pub fn distill_values(distilled: &str, values: Vec<Scalar>, options: UnpackOptions) -> FieldValue {
    if distilled != "c" {
        return FieldValue::Values(values);
    }

    let phrases: Vec<String> = values
        .iter()
        .map(|value| match value {
            Scalar::Char(byte) => format!("{:02x}", byte),
            other => other.to_string(),
        })
        .collect();

    if options.make_nicer {
        FieldValue::HexText(phrases.join(" "))
    } else {
        FieldValue::HexList(phrases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_advances_by_byte_size() {
        let descriptor = FormatDescriptor::parse("<I:<H:B").unwrap();
        let buffer = [0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x03];
        let records = unpack(&buffer, &descriptor).unwrap();

        let values: Vec<_> = records.iter().map(|r| r.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                FieldValue::Values(vec![Scalar::UInt(1)]),
                FieldValue::Values(vec![Scalar::UInt(2)]),
                FieldValue::Values(vec![Scalar::UInt(3)]),
            ]
        );
    }

    #[test]
    fn test_unpack_records_keep_format_and_distilled() {
        let descriptor = FormatDescriptor::parse(">2h:4c").unwrap();
        let records = unpack(&[0, 1, 0, 2, 0xde, 0xad, 0xbe, 0xef], &descriptor).unwrap();

        assert_eq!(records[0].format, ">2h");
        assert_eq!(records[0].distilled, "h");
        assert_eq!(
            records[0].value,
            FieldValue::Values(vec![Scalar::Int(1), Scalar::Int(2)])
        );
        assert_eq!(records[1].format, "4c");
        assert_eq!(records[1].distilled, "c");
        assert_eq!(records[1].value, FieldValue::HexText("de ad be ef".to_string()));
    }

    #[test]
    fn test_unpack_without_nicer_chars() {
        let descriptor = FormatDescriptor::parse("2c").unwrap();
        let options = UnpackOptions { make_nicer: false };
        let records = unpack_with(&[0x0a, 0xff], &descriptor, options).unwrap();
        assert_eq!(
            records[0].value,
            FieldValue::HexList(vec!["0a".to_string(), "ff".to_string()])
        );
    }

    #[test]
    fn test_unpack_short_buffer_fails() {
        let descriptor = FormatDescriptor::parse("<I:<I").unwrap();
        let err = unpack(&[0; 6], &descriptor).unwrap_err();
        match err {
            Error::Decode { part, message } => {
                assert_eq!(part, "<I");
                assert!(message.contains("2 available"), "{}", message);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unpack_consumes_exact_descriptor_size() {
        for text in ["<I:2c:>h:B", "=q:3s:x:?", "<e:<f:<d", "5p:@b:!H"] {
            let descriptor = FormatDescriptor::parse(text).unwrap();
            let buffer = vec![0x01; descriptor.size()];
            assert!(unpack(&buffer, &descriptor).is_ok(), "{}", text);
            assert!(unpack(&buffer[..buffer.len() - 1], &descriptor).is_err(), "{}", text);
        }
    }

    #[test]
    fn test_extra_bytes_are_ignored() {
        let descriptor = FormatDescriptor::parse("B").unwrap();
        let records = unpack(&[7, 8, 9], &descriptor).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, FieldValue::Values(vec![Scalar::UInt(7)]));
    }
}
