mod reader;

// Mock sources for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use reader::{SliceLength, SourceReader, read_slice};

#[doc(hidden)]
pub use mock::{MockSourceBuilder, MockSourceReader};
