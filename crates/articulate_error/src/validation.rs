//! Invariant violations on recovered or caller-supplied values.

/// Specific invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Generation was requested for an empty topic
    #[display("Query must not be empty")]
    EmptyQuery,
    /// Regeneration was requested with an empty instruction
    #[display("Instruction must not be empty")]
    EmptyInstruction,
    /// Article title is empty
    #[display("Article title must not be empty")]
    EmptyTitle,
    /// Article has no sections
    #[display("Article must have at least one section")]
    NoSections,
    /// A required metadata field is empty
    #[display("SEO field '{}' must not be empty", _0)]
    EmptySeoField(&'static str),
    /// Regeneration changed the section count without being asked to
    #[display("Section count changed from {} to {} without a structural instruction", expected, actual)]
    ShapeChanged {
        /// Sections in the input article
        expected: usize,
        /// Sections in the regenerated article
        actual: usize,
    },
    /// Regeneration renamed a section without being asked to
    #[display("Section heading changed from '{}' to '{}' without a heading instruction", expected, actual)]
    HeadingsChanged {
        /// Heading in the input article
        expected: String,
        /// Heading at the same position in the regenerated article
        actual: String,
    },
    /// A service request was built without a required field
    #[display("Incomplete service request: {}", _0)]
    IncompleteRequest(String),
}

/// Validation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    line: u32,
    file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}
