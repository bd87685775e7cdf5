//! Streaming byte-pattern matcher.
//!
//! The matcher walks candidate start positions one at a time and compares the
//! pattern byte by byte. Bytes read during a failed attempt (other than the
//! attempt's lead byte) are kept in a carryover queue and consumed before any
//! new byte is read, so the source is read strictly forward, never twice, and
//! at most `pattern.len() - 1` bytes are ever buffered.

use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use crate::diagnostics::Diagnostics;
use crate::error::{EndOfData, Result};

use super::Pattern;

/// Pending bytes for the matcher: the carryover from the last failed attempt
/// and the bytes gathered by the current one.
struct MatchState {
    carryover: VecDeque<u8>,
    attempt: Vec<u8>,
}

impl MatchState {
    fn new(pattern_len: usize) -> Self {
        Self {
            carryover: VecDeque::with_capacity(pattern_len),
            attempt: Vec::with_capacity(pattern_len),
        }
    }

    /// Next byte for the attempt, preferring the carryover over the source.
    fn next_byte<R: Read>(&mut self, source: &mut R, position: u64) -> Result<(u8, bool)> {
        if let Some(byte) = self.carryover.pop_front() {
            return Ok((byte, true));
        }
        match read_one(source)? {
            Some(byte) => Ok((byte, false)),
            None => Err(EndOfData::SourceExhausted { offset: position }.into()),
        }
    }

    /// The attempt failed: what it gathered, followed by whatever carryover it
    /// did not reach, becomes the carryover for the next candidate.
    fn fail_attempt(&mut self) {
        let leftover: Vec<u8> = self.carryover.drain(..).collect();
        self.carryover.extend(self.attempt.drain(..));
        self.carryover.extend(leftover);
    }

    fn carryover(&mut self) -> &[u8] {
        self.carryover.make_contiguous()
    }
}

/// Find the first occurrence of `pattern` in the next `search_limit` bytes of
/// `source`.
///
/// Returns the match position relative to the source's position on entry.
///
/// # Errors
///
/// Fails with [`EndOfData`] when the limit is exhausted, when the pattern
/// would run past the limit, or when the source ends first.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use bingrok_core::diagnostics::NoDiagnostics;
/// use bingrok_core::search::{find, Pattern};
///
/// let mut source = Cursor::new(vec![1, 2, 1, 2, 3]);
/// let pattern = Pattern::new(vec![1, 2, 3]).unwrap();
/// assert_eq!(find(&mut source, 5, &pattern, &mut NoDiagnostics).unwrap(), 2);
/// ```
pub fn find<R: Read, D: Diagnostics>(
    source: &mut R,
    search_limit: u64,
    pattern: &Pattern,
    diagnostics: &mut D,
) -> Result<u64> {
    let needle = pattern.as_bytes();
    let mut state = MatchState::new(needle.len());

    for candidate in 0..search_limit {
        diagnostics.attempt_started(candidate, state.carryover());
        state.attempt.clear();

        let mut matched = true;
        for (index, &expected) in needle.iter().enumerate() {
            let position = candidate + index as u64;
            if position >= search_limit {
                return Err(EndOfData::PatternPastLimit { offset: position }.into());
            }

            let (byte, from_carryover) = state.next_byte(source, position)?;
            diagnostics.byte_consumed(candidate, index, byte, from_carryover);

            // The lead byte is never retried; the next attempt starts after it.
            if index > 0 {
                state.attempt.push(byte);
            }

            if byte != expected {
                matched = false;
                state.fail_attempt();
                diagnostics.mismatch(candidate, byte, expected, state.carryover());
                break;
            }
        }

        if matched {
            diagnostics.match_found(candidate);
            return Ok(candidate);
        }
    }

    Err(EndOfData::LimitExhausted.into())
}

fn read_one<R: Read>(source: &mut R) -> std::io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match source.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
