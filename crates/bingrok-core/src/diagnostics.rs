//! Diagnostic sink for the reader and matcher.
//!
//! Callers pass a sink explicitly instead of relying on module-level logger
//! state. Every method has a no-op default, so `NoDiagnostics` costs nothing
//! and test sinks only implement the events they care about.

use tracing::trace;

/// Receives step-by-step events from slice reads and pattern searches.
pub trait Diagnostics {
    /// A slice was read: `requested` bytes were asked for, `read` were returned.
    fn slice_read(&mut self, _offset: u64, _requested: usize, _read: usize) {}

    /// A match attempt begins at candidate position `candidate`, with
    /// `carryover` bytes already buffered from an earlier attempt.
    fn attempt_started(&mut self, _candidate: u64, _carryover: &[u8]) {}

    /// A byte was consumed for pattern index `index`.
    fn byte_consumed(&mut self, _candidate: u64, _index: usize, _byte: u8, _from_carryover: bool) {}

    /// An attempt failed; `carryover` is what the next attempt starts with.
    fn mismatch(&mut self, _candidate: u64, _byte: u8, _expected: u8, _carryover: &[u8]) {}

    /// The pattern matched at `position`, relative to where the search began.
    fn match_found(&mut self, _position: u64) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {}

/// Forwards every event to `tracing` at TRACE level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn slice_read(&mut self, offset: u64, requested: usize, read: usize) {
        trace!(offset, requested, read, "slice read");
    }

    fn attempt_started(&mut self, candidate: u64, carryover: &[u8]) {
        if !carryover.is_empty() {
            trace!(candidate, ?carryover, "attempt started with carryover");
        }
    }

    fn byte_consumed(&mut self, candidate: u64, index: usize, byte: u8, from_carryover: bool) {
        if from_carryover {
            trace!("({})-({}): shifted byte off carryover: [{:02x}]", candidate, index, byte);
        } else {
            trace!("({})-({}): read byte from source: [{:02x}]", candidate, index, byte);
        }
    }

    fn mismatch(&mut self, candidate: u64, byte: u8, expected: u8, carryover: &[u8]) {
        trace!(
            "({}): [{:02x}] != [{:02x}], not a match. carryover={:02x?}",
            candidate, byte, expected, carryover
        );
    }

    fn match_found(&mut self, position: u64) {
        trace!("found at ({})", position);
    }
}
