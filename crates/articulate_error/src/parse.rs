//! Structured response recovery errors.

/// The recovery stage that gave up.
///
/// Stages run in order; the kind reported is the last one attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ParseErrorKind {
    /// The service text was empty after trimming fences and whitespace
    #[display("Response was empty")]
    EmptyInput,
    /// Direct structural parse failed and no brace span was available
    #[display("Direct parse failed: {}", _0)]
    DirectParse(String),
    /// A brace span was found but did not parse either
    #[display("Brace-span recovery failed: {}", _0)]
    BraceRecovery(String),
    /// The text contained no balanced object at all
    #[display("No JSON object found in response")]
    NoObjectFound,
}

/// Structured response recovery error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", kind, line, file)]
pub struct ParseError {
    /// The stage that failed
    pub kind: ParseErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ParseError {
    /// Create a new ParseError at the current location.
    #[track_caller]
    pub fn new(kind: ParseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
