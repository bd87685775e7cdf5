//! CLI command implementations.
//!
//! Each command writes its report to the given writer and returns an
//! `Outcome`; `main` maps the outcome to the process exit code.

pub mod dump;
pub mod search;
pub mod unpack;

use std::process::ExitCode;

/// Exit code when a search finds nothing.
pub const NOT_FOUND_EXIT_CODE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NotFound,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::NotFound => ExitCode::from(NOT_FOUND_EXIT_CODE),
        }
    }
}

#[cfg(test)]
pub(crate) fn fixture_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
