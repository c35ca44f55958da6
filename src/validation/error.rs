//! Dictionary lookup error types.

use derive_more::{Display, Error};
use tracing::{instrument, warn};

/// A remote dictionary lookup that could not be completed.
///
/// The validator never hands this to its callers; it is logged and the word
/// is treated as invalid.
#[derive(Debug, Clone, Display, Error)]
#[display("Lookup error: {} at {}:{}", message, file, line)]
pub struct LookupError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LookupError {
    /// Creates a new lookup error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        warn!(error_message = %message, "Lookup error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP error: {}", err))
    }
}
