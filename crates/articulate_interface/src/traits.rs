//! Trait definitions for generative service backends.

use articulate_core::{ServiceRequest, ServiceResponse};
use articulate_error::ServiceError;
use async_trait::async_trait;

/// A backend that turns a prompt into free-form text.
///
/// Implementations perform one network round trip per call and must not
/// retain per-request state, so a single instance can serve concurrent
/// requests. Failures are reported as [`ServiceError`] so the pipeline can
/// tell network, auth, quota and timeout failures apart.
///
/// When `grounding_enabled` is false, or the backend has no grounding
/// capability, `citations` in the response is empty.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Send one prompt and return the raw response.
    async fn generate(&self, req: &ServiceRequest) -> Result<ServiceResponse, ServiceError>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}
