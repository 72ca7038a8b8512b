//! Error types for the Articulate pipeline.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! The top-level [`ArticulateErrorKind`] has one variant per failure a caller
//! can act on: the generative service was unavailable, it timed out, its output
//! could not be recovered, the recovered value was invalid, or rendering failed.
//!
//! # Examples
//!
//! ```
//! use articulate_error::{ArticulateErrorKind, ArticulateResult, ParseError, ParseErrorKind};
//!
//! fn recover() -> ArticulateResult<String> {
//!     Err(ParseError::new(ParseErrorKind::NoObjectFound))?
//! }
//!
//! let err = recover().unwrap_err();
//! assert!(matches!(err.kind(), ArticulateErrorKind::ParseFailure(_)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod io;
mod json;
mod parse;
mod render;
mod service;
mod timeout;
mod validation;

pub use config::ConfigError;
pub use error::{ArticulateError, ArticulateErrorKind, ArticulateResult};
pub use io::IoError;
pub use json::JsonError;
pub use parse::{ParseError, ParseErrorKind};
pub use render::RenderError;
pub use service::{ServiceError, ServiceErrorKind, ServiceFailure};
pub use timeout::TimeoutError;
pub use validation::{ValidationError, ValidationErrorKind};
