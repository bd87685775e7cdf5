//! In-memory sources for testing
//!
//! Builds byte layouts with a fluent API and wraps them in a `SourceReader`
//! backed by a `Cursor`, so reader and search logic can be exercised without
//! touching the filesystem.

use std::io::Cursor;

use super::SourceReader;

/// Source reader over an in-memory buffer
pub type MockSourceReader = SourceReader<Cursor<Vec<u8>>>;

/// Builder for test byte layouts
#[derive(Debug, Clone, Default)]
pub struct MockSourceBuilder {
    data: Vec<u8>,
}

impl MockSourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate the buffer with `fill` bytes up to `size`
    pub fn with_size(mut self, size: usize, fill: u8) -> Self {
        self.data.resize(size, fill);
        self
    }

    /// Write raw bytes at `offset`
    pub fn write_bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.ensure_size(offset + bytes.len());
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Write a little-endian unsigned 16-bit integer at `offset`
    pub fn write_u16_le(self, offset: usize, value: u16) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    /// Write a little-endian unsigned 32-bit integer at `offset`
    pub fn write_u32_le(self, offset: usize, value: u32) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    /// Write a big-endian unsigned 32-bit integer at `offset`
    pub fn write_u32_be(self, offset: usize, value: u32) -> Self {
        self.write_bytes(offset, &value.to_be_bytes())
    }

    /// The built bytes, e.g. for writing a fixture file
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn build(self) -> MockSourceReader {
        let len = self.data.len() as u64;
        SourceReader::from_parts(Cursor::new(self.data), len)
    }

    fn ensure_size(&mut self, required: usize) {
        if self.data.len() < required {
            self.data.resize(required, 0);
        }
    }
}
