use thiserror::Error;

/// Why a search stopped without producing a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EndOfData {
    #[error("could not find pattern within the search limit")]
    LimitExhausted,

    #[error("pattern runs past the search limit at ({offset})")]
    PatternPastLimit { offset: u64 },

    #[error("no more data at ({offset})")]
    SourceExhausted { offset: u64 },

    #[error("not enough matches, or start offset ({start_offset}) beyond file size")]
    NotEnoughMatches { start_offset: u64 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("End of data: {0}")]
    EndOfData(#[from] EndOfData),

    #[error("Failed to decode format part {part:?}: {message}")]
    Decode { part: String, message: String },

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn decode(part: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Decode {
            part: part.into(),
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Error::Precondition(message.into())
    }

    /// True when the error is the recoverable "nothing (more) found" outcome.
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, Error::EndOfData(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
