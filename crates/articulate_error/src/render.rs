//! Rendering error types.

/// HTML rendering error with source location.
///
/// Rendering is a pure transformation and does not fail on valid input. This
/// error is reserved for malformed values that slipped past validation.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", message, line, file)]
pub struct RenderError {
    /// What was wrong with the input
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl RenderError {
    /// Create a new RenderError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
