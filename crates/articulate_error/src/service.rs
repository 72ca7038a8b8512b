//! Generative service error types.

/// Coarse classification of a service failure.
///
/// Every non-timeout [`ServiceErrorKind`] maps onto exactly one of these, so
/// callers can tell a network outage from a rejected key or an exhausted quota
/// without matching on provider-specific detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ServiceFailure {
    /// The service could not be reached
    #[display("network")]
    Network,
    /// The service rejected our credentials
    #[display("auth")]
    Auth,
    /// The service refused because a quota or rate limit was hit
    #[display("quota")]
    Quota,
    /// The service answered, but not with anything usable
    #[display("upstream")]
    Upstream,
}

/// Generative service error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ServiceErrorKind {
    /// API key not found in environment
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Transport-level failure (DNS, TLS, connection reset)
    #[display("Network error: {}", _0)]
    Network(String),
    /// Credentials were rejected
    #[display("Authentication failed (HTTP {}): {}", status_code, message)]
    Auth {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },
    /// Quota or rate limit exhausted
    #[display("Quota exhausted (HTTP {}): {}", status_code, message)]
    Quota {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },
    /// Any other non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Upstream {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },
    /// The transport gave up waiting for the service
    #[display("Request timed out after {}ms", after_ms)]
    Timeout {
        /// How long we waited, in milliseconds
        after_ms: u64,
    },
    /// The service answered with no text
    #[display("Service returned an empty response")]
    EmptyResponse,
    /// The service answered with a body we could not decode
    #[display("Malformed service response: {}", _0)]
    MalformedResponse(String),
}

impl ServiceErrorKind {
    /// Classify an HTTP status code into the matching kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use articulate_error::{ServiceErrorKind, ServiceFailure};
    ///
    /// let kind = ServiceErrorKind::from_status(429, "slow down");
    /// assert_eq!(kind.failure(), Some(ServiceFailure::Quota));
    /// ```
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => ServiceErrorKind::Auth {
                status_code,
                message,
            },
            429 => ServiceErrorKind::Quota {
                status_code,
                message,
            },
            _ => ServiceErrorKind::Upstream {
                status_code,
                message,
            },
        }
    }

    /// The coarse failure class, or `None` for timeouts.
    pub fn failure(&self) -> Option<ServiceFailure> {
        match self {
            ServiceErrorKind::Network(_) => Some(ServiceFailure::Network),
            ServiceErrorKind::MissingApiKey | ServiceErrorKind::Auth { .. } => {
                Some(ServiceFailure::Auth)
            }
            ServiceErrorKind::Quota { .. } => Some(ServiceFailure::Quota),
            ServiceErrorKind::Upstream { .. }
            | ServiceErrorKind::EmptyResponse
            | ServiceErrorKind::MalformedResponse(_) => Some(ServiceFailure::Upstream),
            ServiceErrorKind::Timeout { .. } => None,
        }
    }

    /// Whether the transport reported a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ServiceErrorKind::Timeout { .. })
    }
}

/// Generative service error with source location tracking.
///
/// # Examples
///
/// ```
/// use articulate_error::{ServiceError, ServiceErrorKind};
///
/// let err = ServiceError::new(ServiceErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Service Error: {} at line {} in {}", kind, line, file)]
pub struct ServiceError {
    /// The kind of error that occurred
    pub kind: ServiceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ServiceError {
    /// Create a new ServiceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServiceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
