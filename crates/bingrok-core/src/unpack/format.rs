//! Format descriptors: colon-delimited primitive parts such as `<I:4c:>h`.
//!
//! Each part is an optional byte-order prefix, an optional repeat count and
//! exactly one type code.

use std::ffi::c_long;
use std::fmt;
use std::mem::size_of;
use std::str::FromStr;

use crate::error::{Error, Result};

use super::value::Scalar;

/// Separator between parts of a descriptor.
pub const PART_DELIMITER: char = ':';

const BYTE_ORDER_PREFIXES: [char; 5] = ['@', '=', '<', '>', '!'];

/// Byte order and size convention selected by a part's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// `@` or no prefix: native order, native sizes.
    #[default]
    Native,
    /// `=`: native order, standard sizes.
    NativeStandard,
    /// `<`
    Little,
    /// `>`
    Big,
    /// `!`
    Network,
}

impl ByteOrder {
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            '@' => Some(ByteOrder::Native),
            '=' => Some(ByteOrder::NativeStandard),
            '<' => Some(ByteOrder::Little),
            '>' => Some(ByteOrder::Big),
            '!' => Some(ByteOrder::Network),
            _ => None,
        }
    }

    pub fn is_little_endian(self) -> bool {
        match self {
            ByteOrder::Native | ByteOrder::NativeStandard => cfg!(target_endian = "little"),
            ByteOrder::Little => true,
            ByteOrder::Big | ByteOrder::Network => false,
        }
    }

    fn uses_native_sizes(self) -> bool {
        self == ByteOrder::Native
    }
}

/// Primitive type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Pad,
    Char,
    I8,
    U8,
    Bool,
    I16,
    U16,
    I32,
    U32,
    Long,
    ULong,
    I64,
    U64,
    ISize,
    USize,
    F16,
    F32,
    F64,
    Bytes,
    Pascal,
    Pointer,
}

impl Kind {
    pub fn from_code(code: char) -> Option<Self> {
        let kind = match code {
            'x' => Kind::Pad,
            'c' => Kind::Char,
            'b' => Kind::I8,
            'B' => Kind::U8,
            '?' => Kind::Bool,
            'h' => Kind::I16,
            'H' => Kind::U16,
            'i' => Kind::I32,
            'I' => Kind::U32,
            'l' => Kind::Long,
            'L' => Kind::ULong,
            'q' => Kind::I64,
            'Q' => Kind::U64,
            'n' => Kind::ISize,
            'N' => Kind::USize,
            'e' => Kind::F16,
            'f' => Kind::F32,
            'd' => Kind::F64,
            's' => Kind::Bytes,
            'p' => Kind::Pascal,
            'P' => Kind::Pointer,
            _ => return None,
        };
        Some(kind)
    }

    pub fn code(self) -> char {
        match self {
            Kind::Pad => 'x',
            Kind::Char => 'c',
            Kind::I8 => 'b',
            Kind::U8 => 'B',
            Kind::Bool => '?',
            Kind::I16 => 'h',
            Kind::U16 => 'H',
            Kind::I32 => 'i',
            Kind::U32 => 'I',
            Kind::Long => 'l',
            Kind::ULong => 'L',
            Kind::I64 => 'q',
            Kind::U64 => 'Q',
            Kind::ISize => 'n',
            Kind::USize => 'N',
            Kind::F16 => 'e',
            Kind::F32 => 'f',
            Kind::F64 => 'd',
            Kind::Bytes => 's',
            Kind::Pascal => 'p',
            Kind::Pointer => 'P',
        }
    }

    /// Only meaningful with native sizes.
    fn is_native_only(self) -> bool {
        matches!(self, Kind::ISize | Kind::USize | Kind::Pointer)
    }

    /// Count applies to the field width instead of repeating the value.
    fn counts_bytes(self) -> bool {
        matches!(self, Kind::Pad | Kind::Bytes | Kind::Pascal)
    }

    fn is_signed(self) -> bool {
        matches!(
            self,
            Kind::I8 | Kind::I16 | Kind::I32 | Kind::Long | Kind::I64 | Kind::ISize
        )
    }

    fn width(self, order: ByteOrder) -> usize {
        let native = order.uses_native_sizes();
        match self {
            Kind::Pad | Kind::Char | Kind::I8 | Kind::U8 | Kind::Bool => 1,
            Kind::Bytes | Kind::Pascal => 1,
            Kind::I16 | Kind::U16 | Kind::F16 => 2,
            Kind::I32 | Kind::U32 | Kind::F32 => 4,
            Kind::Long | Kind::ULong if native => size_of::<c_long>(),
            Kind::Long | Kind::ULong => 4,
            Kind::I64 | Kind::U64 | Kind::F64 => 8,
            Kind::ISize | Kind::USize => size_of::<isize>(),
            Kind::Pointer => size_of::<usize>(),
        }
    }
}

/// One parsed part of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPart {
    raw: String,
    order: ByteOrder,
    count: usize,
    kind: Kind,
    size: usize,
}

impl FormatPart {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut chars = raw.chars().peekable();

        let order = match chars.peek().copied().and_then(ByteOrder::from_prefix) {
            Some(order) => {
                chars.next();
                order
            }
            None => ByteOrder::Native,
        };

        let mut digits = String::new();
        while let Some(c) = chars.next_if(char::is_ascii_digit) {
            digits.push(c);
        }
        let count = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<usize>()
                .map_err(|e| Error::decode(raw, format!("invalid repeat count: {}", e)))?
        };

        let code = chars
            .next()
            .ok_or_else(|| Error::decode(raw, "missing type code"))?;
        let kind = Kind::from_code(code)
            .ok_or_else(|| Error::decode(raw, format!("unknown type code {:?}", code)))?;

        if let Some(extra) = chars.next() {
            return Err(Error::decode(
                raw,
                format!("expected a single type code, found trailing {:?}", extra),
            ));
        }

        if kind.is_native_only() && !order.uses_native_sizes() {
            return Err(Error::decode(
                raw,
                format!("type code {:?} requires native byte order", code),
            ));
        }

        let size = if kind.counts_bytes() {
            count
        } else {
            count
                .checked_mul(kind.width(order))
                .ok_or_else(|| Error::decode(raw, "repeat count too large"))?
        };

        Ok(Self {
            raw: raw.to_string(),
            order,
            count,
            kind,
            size,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Bytes consumed by this part.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The bare type code, e.g. `c` for `<16c`.
    pub fn distilled(&self) -> &str {
        distill_part_format(&self.raw)
    }

    /// Decode exactly `self.size()` bytes into this part's values.
    pub(crate) fn decode(&self, bytes: &[u8]) -> Vec<Scalar> {
        debug_assert_eq!(bytes.len(), self.size);

        match self.kind {
            Kind::Pad => Vec::new(),
            Kind::Bytes => vec![Scalar::Bytes(bytes.to_vec())],
            Kind::Pascal => vec![Scalar::Bytes(decode_pascal(bytes))],
            _ => {
                let width = self.kind.width(self.order);
                let little = self.order.is_little_endian();
                bytes
                    .chunks_exact(width)
                    .map(|chunk| self.decode_one(chunk, little))
                    .collect()
            }
        }
    }

    fn decode_one(&self, chunk: &[u8], little: bool) -> Scalar {
        let bits = read_uint(chunk, little);
        match self.kind {
            Kind::Char => Scalar::Char(chunk[0]),
            Kind::Bool => Scalar::Bool(bits != 0),
            Kind::F16 => Scalar::Float(f16_to_f32(bits as u16) as f64),
            Kind::F32 => Scalar::Float(f32::from_bits(bits as u32) as f64),
            Kind::F64 => Scalar::Float(f64::from_bits(bits)),
            kind if kind.is_signed() => Scalar::Int(sign_extend(bits, chunk.len())),
            _ => Scalar::UInt(bits),
        }
    }
}

impl fmt::Display for FormatPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// An ordered, immutable sequence of parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDescriptor {
    parts: Vec<FormatPart>,
    size: usize,
}

impl FormatDescriptor {
    pub fn parse(descriptor: &str) -> Result<Self> {
        let parts = descriptor
            .split(PART_DELIMITER)
            .map(FormatPart::parse)
            .collect::<Result<Vec<_>>>()?;
        let size = parts
            .iter()
            .try_fold(0usize, |total, part| total.checked_add(part.size()))
            .ok_or_else(|| Error::decode(descriptor, "total size too large"))?;
        Ok(Self { parts, size })
    }

    pub fn parts(&self) -> &[FormatPart] {
        &self.parts
    }

    /// Total bytes consumed by all parts, with no padding between them.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl FromStr for FormatDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PART_DELIMITER)?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// Strip any byte-order prefix and leading repeat count from a part.
///
/// # Example
///
/// ```
/// use bingrok_core::unpack::distill_part_format;
///
/// assert_eq!(distill_part_format("<16c"), "c");
/// assert_eq!(distill_part_format("I"), "I");
/// ```
pub fn distill_part_format(part: &str) -> &str {
    let part = part
        .strip_prefix(|c: char| BYTE_ORDER_PREFIXES.contains(&c))
        .unwrap_or(part);
    part.trim_start_matches(|c: char| c.is_ascii_digit())
}

fn read_uint(bytes: &[u8], little: bool) -> u64 {
    let fold = |acc: u64, &b: &u8| (acc << 8) | b as u64;
    if little {
        bytes.iter().rev().fold(0, fold)
    } else {
        bytes.iter().fold(0, fold)
    }
}

fn sign_extend(bits: u64, width: usize) -> i64 {
    let shift = 64 - 8 * width as u32;
    ((bits << shift) as i64) >> shift
}

fn decode_pascal(bytes: &[u8]) -> Vec<u8> {
    match bytes.split_first() {
        Some((&len, rest)) => rest[..(len as usize).min(rest.len())].to_vec(),
        None => Vec::new(),
    }
}

/// IEEE 754 binary16 to binary32.
fn f16_to_f32(half: u16) -> f32 {
    let sign = ((half >> 15) & 0x1) as u32;
    let exponent = ((half >> 10) & 0x1f) as u32;
    let mantissa = (half & 0x3ff) as u32;

    let bits = match (exponent, mantissa) {
        (0, 0) => sign << 31,
        (0, _) => {
            // Subnormal: normalize into an f32 exponent.
            let mut e: i32 = -14;
            let mut m = mantissa;
            while m & 0x400 == 0 {
                m <<= 1;
                e -= 1;
            }
            (sign << 31) | (((e + 127) as u32) << 23) | ((m & 0x3ff) << 13)
        }
        (0x1f, 0) => (sign << 31) | 0x7f80_0000,
        (0x1f, _) => (sign << 31) | 0x7fc0_0000 | (mantissa << 13),
        _ => (sign << 31) | ((exponent + 127 - 15) << 23) | (mantissa << 13),
    };
    f32::from_bits(bits)
}
