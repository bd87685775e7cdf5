//! Search patterns parsed from hex tokens.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A non-empty byte sequence to match contiguously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern(Vec<u8>);

impl Pattern {
    /// Wrap raw bytes. An empty pattern is rejected.
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::precondition("no search bytes given"));
        }
        Ok(Self(bytes))
    }

    /// Parse one byte per token, e.g. `["ff", "7f"]`.
    ///
    /// Tokens are base-16, case-insensitive, with an optional `0x` prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use bingrok_core::search::Pattern;
    ///
    /// let pattern = Pattern::from_hex_tokens(&["ff", "0x7F"]).unwrap();
    /// assert_eq!(pattern.as_bytes(), &[0xff, 0x7f]);
    /// ```
    pub fn from_hex_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let bytes = tokens
            .iter()
            .map(|token| parse_hex_byte(token.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the pattern is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Pattern {
    type Err = Error;

    /// Whitespace-separated hex tokens, e.g. `"ff 7f"`.
    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        Self::from_hex_tokens(&tokens)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

fn parse_hex_byte(token: &str) -> Result<u8> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);

    let value = u32::from_str_radix(digits, 16)
        .map_err(|e| Error::precondition(format!("invalid hex byte {:?}: {}", token, e)))?;

    u8::try_from(value)
        .map_err(|_| Error::precondition(format!("hex value {:?} does not fit in one byte", token)))
}
