//! Request and response types exchanged with a generative service.

use crate::Source;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single prompt sent to a generative service.
///
/// # Examples
///
/// ```
/// use articulate_core::ServiceRequest;
///
/// let request = ServiceRequest::builder()
///     .prompt("Write about tides")
///     .build()
///     .unwrap();
///
/// assert!(!request.grounding_enabled());
/// assert!(request.context_url().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ServiceRequest {
    /// Full prompt text
    prompt: String,
    /// Page the service should treat as primary context
    #[builder(default)]
    context_url: Option<String>,
    /// Whether web-search grounding may be used
    #[builder(default = false)]
    grounding_enabled: bool,
}

impl ServiceRequest {
    /// Creates a new builder for `ServiceRequest`.
    pub fn builder() -> ServiceRequestBuilder {
        ServiceRequestBuilder::default()
    }
}

/// A citation attached to a response by the service itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citation {
    /// Page title
    pub title: String,
    /// Page URL
    pub url: String,
    /// Optional snippet or note
    #[serde(default)]
    pub description: String,
}

impl From<Citation> for Source {
    fn from(citation: Citation) -> Self {
        Source {
            title: citation.title,
            url: citation.url,
            description: citation.description,
        }
    }
}

/// Raw text answered by a generative service.
///
/// `citations` is empty when grounding is disabled or the service cited nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResponse {
    /// Free-form response text
    pub text: String,
    /// Citations reported alongside the text
    #[serde(default)]
    pub citations: Vec<Citation>,
}

impl ServiceResponse {
    /// A response carrying only text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }
}
