//! Invariant checks for values recovered from free-form text.

use articulate_error::ValidationError;

/// A value with invariants beyond what its type can express.
///
/// Structured recovery only hands back values for which `validate` succeeds,
/// so downstream stages never see a partially populated object.
pub trait Validate {
    /// Check the invariants, reporting the first violation.
    fn validate(&self) -> Result<(), ValidationError>;
}
