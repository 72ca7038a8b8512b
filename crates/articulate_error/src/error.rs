//! Top-level error wrapper types.

use crate::{
    ConfigError, IoError, JsonError, ParseError, RenderError, ServiceError, TimeoutError,
    ValidationError,
};

/// Every failure the pipeline can surface.
///
/// The first five variants are the typed failures callers translate into a
/// response; the rest are ambient (configuration, serialization, filesystem).
///
/// # Examples
///
/// ```
/// use articulate_error::{ArticulateError, ArticulateErrorKind, ServiceError, ServiceErrorKind};
///
/// let err: ArticulateError = ServiceError::new(ServiceErrorKind::Timeout { after_ms: 10 }).into();
/// assert!(matches!(err.kind(), ArticulateErrorKind::ServiceTimeout(_)));
///
/// let err: ArticulateError = ServiceError::new(ServiceErrorKind::Network("reset".into())).into();
/// assert!(matches!(err.kind(), ArticulateErrorKind::ServiceUnavailable(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ArticulateErrorKind {
    /// Network, auth or quota failure from the generative service
    #[from(ignore)]
    ServiceUnavailable(ServiceError),
    /// The generative service missed the request deadline
    #[from(TimeoutError)]
    ServiceTimeout(TimeoutError),
    /// Structured recovery exhausted every strategy
    #[from(ParseError)]
    ParseFailure(ParseError),
    /// A recovered or supplied value violates its invariants
    #[from(ValidationError)]
    ValidationFailure(ValidationError),
    /// Rendering received malformed input
    #[from(RenderError)]
    RenderFailure(RenderError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Filesystem error
    #[from(IoError)]
    Io(IoError),
}

// Transport timeouts surface as ServiceTimeout, same as the request deadline.
impl From<ServiceError> for ArticulateErrorKind {
    fn from(err: ServiceError) -> Self {
        match err.kind {
            crate::ServiceErrorKind::Timeout { after_ms } => Self::ServiceTimeout(TimeoutError {
                deadline_ms: after_ms,
                line: err.line,
                file: err.file,
            }),
            _ => Self::ServiceUnavailable(err),
        }
    }
}

/// Articulate error with kind discrimination.
///
/// # Examples
///
/// ```
/// use articulate_error::{ArticulateResult, ConfigError};
///
/// fn might_fail() -> ArticulateResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Articulate Error: {}", _0)]
pub struct ArticulateError(Box<ArticulateErrorKind>);

impl ArticulateError {
    /// Create a new error from a kind.
    pub fn new(kind: ArticulateErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ArticulateErrorKind {
        &self.0
    }

    /// Short machine-readable name of the failure, suitable for log fields.
    pub fn category(&self) -> &'static str {
        match self.kind() {
            ArticulateErrorKind::ServiceUnavailable(_) => "service_unavailable",
            ArticulateErrorKind::ServiceTimeout(_) => "service_timeout",
            ArticulateErrorKind::ParseFailure(_) => "parse_failure",
            ArticulateErrorKind::ValidationFailure(_) => "validation_failure",
            ArticulateErrorKind::RenderFailure(_) => "render_failure",
            ArticulateErrorKind::Config(_) => "config",
            ArticulateErrorKind::Json(_) => "json",
            ArticulateErrorKind::Io(_) => "io",
        }
    }
}

// Generic From implementation for any type that converts to ArticulateErrorKind
impl<T> From<T> for ArticulateError
where
    T: Into<ArticulateErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Articulate operations.
pub type ArticulateResult<T> = std::result::Result<T, ArticulateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParseErrorKind, ServiceErrorKind, ValidationErrorKind};

    #[test]
    fn test_derived_conversions_pick_variant() {
        let cases: Vec<(ArticulateError, &str)> = vec![
            (TimeoutError::new(500).into(), "service_timeout"),
            (ParseError::new(ParseErrorKind::NoObjectFound).into(), "parse_failure"),
            (
                ValidationError::new(ValidationErrorKind::EmptyQuery).into(),
                "validation_failure",
            ),
            (RenderError::new("no sections").into(), "render_failure"),
            (ConfigError::new("missing key").into(), "config"),
            (JsonError::new("trailing comma").into(), "json"),
            (IoError::new("denied").into(), "io"),
        ];
        for (err, category) in cases {
            assert_eq!(err.category(), category);
        }
    }

    #[test]
    fn test_service_error_routes_timeouts() {
        let err: ArticulateError =
            ServiceError::new(ServiceErrorKind::Timeout { after_ms: 250 }).into();
        match err.kind() {
            ArticulateErrorKind::ServiceTimeout(timeout) => assert_eq!(timeout.deadline_ms, 250),
            other => panic!("expected timeout, got {other:?}"),
        }

        let err: ArticulateError =
            ServiceError::new(ServiceErrorKind::Network("reset".into())).into();
        assert_eq!(err.category(), "service_unavailable");
    }
}
