//! Byte-pattern search.
//!
//! This module provides:
//! - `Pattern` - a non-empty byte sequence parsed from hex tokens
//! - `find` - the streaming matcher over any `Read`
//! - `SearchRequest` / `search` - start offset and skip-count handling on top
//!   of `find`, re-seeking one byte past each earlier match

mod matcher;
mod pattern;

use std::io::{Read, Seek, SeekFrom};

use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::error::{EndOfData, Result};

pub use matcher::find;
pub use pattern::Pattern;

/// A search over a seekable source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub pattern: Pattern,
    /// Leading bytes to skip before the first search.
    pub start_offset: u64,
    /// Matches to discard before the one returned.
    pub skip_count: u64,
    /// Only the first `max_bytes` bytes of the source are searched.
    /// `None` searches the whole source.
    pub max_bytes: Option<u64>,
}

impl SearchRequest {
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            start_offset: 0,
            skip_count: 0,
            max_bytes: None,
        }
    }

    pub fn start_offset(mut self, start_offset: u64) -> Self {
        self.start_offset = start_offset;
        self
    }

    pub fn skip_count(mut self, skip_count: u64) -> Self {
        self.skip_count = skip_count;
        self
    }

    pub fn max_bytes(mut self, max_bytes: Option<u64>) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

/// Run `request` against `source`, whose total size is `source_len`.
///
/// Returns the absolute offset of match number `skip_count` (0-indexed).
///
/// # Errors
///
/// Fails with [`EndOfData`] when there are fewer than `skip_count + 1`
/// matches, or when a search would start beyond the end of the source.
pub fn search<R: Read + Seek, D: Diagnostics>(
    source: &mut R,
    source_len: u64,
    request: &SearchRequest,
    diagnostics: &mut D,
) -> Result<u64> {
    let region_end = request.max_bytes.unwrap_or(source_len);
    let mut start = request.start_offset;
    let mut round = 0u64;

    loop {
        if start > 0 && start >= source_len {
            return Err(EndOfData::NotEnoughMatches {
                start_offset: start,
            }
            .into());
        }

        source.seek(SeekFrom::Start(start))?;
        let limit = region_end.saturating_sub(start);
        debug!(round, start, limit, pattern = %request.pattern, "searching");

        let offset = start + find(source, limit, &request.pattern, diagnostics)?;
        if round == request.skip_count {
            return Ok(offset);
        }

        round += 1;
        start = offset + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NoDiagnostics;
    use crate::error::Error;
    use std::io::Cursor;

    fn run(data: &[u8], request: &SearchRequest) -> Result<u64> {
        let mut source = Cursor::new(data.to_vec());
        search(&mut source, data.len() as u64, request, &mut NoDiagnostics)
    }

    fn request(needle: &[u8]) -> SearchRequest {
        SearchRequest::new(Pattern::new(needle.to_vec()).unwrap())
    }

    #[test]
    fn test_first_match() {
        let data = [0xff, 0xd8, 0xff, 0xe1];
        assert_eq!(run(&data, &request(&[0xff])).unwrap(), 0);
    }

    #[test]
    fn test_start_offset() {
        let data = [0xff, 0xd8, 0xff, 0xe1];
        assert_eq!(run(&data, &request(&[0xff]).start_offset(1)).unwrap(), 2);
    }

    #[test]
    fn test_skip_count() {
        let data = [0xff, 0xd8, 0xff, 0xe1, 0xff];
        assert_eq!(run(&data, &request(&[0xff]).skip_count(1)).unwrap(), 2);
        assert_eq!(run(&data, &request(&[0xff]).skip_count(2)).unwrap(), 4);
    }

    #[test]
    fn test_skip_past_last_match() {
        let data = [0xff, 0xd8, 0xff, 0xe1];
        let err = run(&data, &request(&[0xff]).skip_count(2)).unwrap_err();
        assert!(err.is_end_of_data());
    }

    #[test]
    fn test_match_on_last_byte_then_skip() {
        // The next round would start at the source length.
        let data = [0x00, 0xff];
        let err = run(&data, &request(&[0xff]).skip_count(1)).unwrap_err();
        assert!(matches!(
            err,
            Error::EndOfData(EndOfData::NotEnoughMatches { start_offset: 2 })
        ));
    }

    #[test]
    fn test_start_offset_beyond_source() {
        let data = [0xff, 0xff];
        let err = run(&data, &request(&[0xff]).start_offset(5)).unwrap_err();
        assert!(matches!(
            err,
            Error::EndOfData(EndOfData::NotEnoughMatches { start_offset: 5 })
        ));
    }

    #[test]
    fn test_max_bytes_bounds_region() {
        let data = [0, 0, 0, 0, 0xab];
        let err = run(&data, &request(&[0xab]).max_bytes(Some(4))).unwrap_err();
        assert!(err.is_end_of_data());
        assert_eq!(run(&data, &request(&[0xab]).max_bytes(Some(5))).unwrap(), 4);
    }

    #[test]
    fn test_overlapping_matches_are_counted() {
        let data = [0xaa, 0xaa, 0xaa];
        assert_eq!(run(&data, &request(&[0xaa, 0xaa]).skip_count(1)).unwrap(), 1);
    }

    #[test]
    fn test_empty_source() {
        let err = run(&[], &request(&[0x00])).unwrap_err();
        assert!(err.is_end_of_data());
    }
}
