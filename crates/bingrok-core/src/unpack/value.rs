//! Decoded values and unpack records.

use std::fmt;

use serde::{Serialize, Serializer};

/// One decoded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Char(u8),
    Bytes(Vec<u8>),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::UInt(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Char(c) => write!(f, "'{}'", c.escape_ascii()),
            Scalar::Bytes(bytes) => write!(f, "\"{}\"", bytes.escape_ascii()),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Int(v) => serializer.serialize_i64(*v),
            Scalar::UInt(v) => serializer.serialize_u64(*v),
            Scalar::Float(v) => serializer.serialize_f64(*v),
            Scalar::Bool(v) => serializer.serialize_bool(*v),
            Scalar::Char(c) => serializer.collect_str(&c.escape_ascii()),
            Scalar::Bytes(bytes) => serializer.collect_str(&bytes.escape_ascii()),
        }
    }
}

/// The rendered value of one format part.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Decoded values, in order.
    Values(Vec<Scalar>),
    /// A char array as space-joined two-digit hex.
    HexText(String),
    /// A char array as one two-digit hex string per byte.
    HexList(Vec<String>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Values(values) => write_joined(f, values),
            FieldValue::HexText(text) => f.write_str(text),
            FieldValue::HexList(items) => write_joined(f, items),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Result of unpacking one format part.
#[derive(Debug, Clone, PartialEq)]
pub struct UnpackRecord {
    /// The part as written, e.g. `<16c`.
    pub format: String,
    /// The bare type code, e.g. `c`.
    pub distilled: String,
    pub value: FieldValue,
}
