//! Request deadline errors.

/// The generative service did not answer within the request deadline.
///
/// # Examples
///
/// ```
/// use articulate_error::TimeoutError;
///
/// let err = TimeoutError::new(120_000);
/// assert_eq!(err.deadline_ms, 120_000);
/// assert!(format!("{}", err).contains("120000ms"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Timeout Error: no response within {}ms at line {} in {}", deadline_ms, line, file)]
pub struct TimeoutError {
    /// The deadline that was exceeded, in milliseconds
    pub deadline_ms: u64,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TimeoutError {
    /// Create a new TimeoutError for the given deadline.
    #[track_caller]
    pub fn new(deadline_ms: u64) -> Self {
        let location = std::panic::Location::caller();
        Self {
            deadline_ms,
            line: location.line(),
            file: location.file(),
        }
    }
}
