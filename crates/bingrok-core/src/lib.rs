pub mod config;
pub mod diagnostics;
pub mod error;
pub mod present;
pub mod search;
pub mod source;
pub mod unpack;

pub use config::DumpLayout;
pub use diagnostics::{Diagnostics, NoDiagnostics, TracingDiagnostics};
pub use error::{EndOfData, Error, Result};
pub use present::FieldLayout;
pub use search::{Pattern, SearchRequest};
pub use source::{SliceLength, SourceReader};
pub use unpack::{FieldValue, FormatDescriptor, Scalar, UnpackOptions, UnpackRecord};
