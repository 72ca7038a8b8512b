//! Google Gemini REST client.
//!
//! # Example
//!
//! ```no_run
//! use articulate_core::ServiceRequest;
//! use articulate_interface::GenerativeService;
//! use articulate_models::{GeminiClient, ServiceConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig {
//!     grounding: true,
//!     ..Default::default()
//! };
//! let client = GeminiClient::from_config(&config)?;
//!
//! let request = ServiceRequest::builder()
//!     .prompt("Summarise the 2024 Paris Olympics")
//!     .grounding_enabled(true)
//!     .build()?;
//! let response = client.generate(&request).await?;
//! for citation in &response.citations {
//!     println!("{} <{}>", citation.title, citation.url);
//! }
//! # Ok(())
//! # }
//! ```

use super::{GeminiErrorBody, GeminiGenerationConfig, GeminiRequest, GeminiResponse};
use crate::ServiceConfig;
use articulate_core::{ServiceRequest, ServiceResponse};
use articulate_error::{ServiceError, ServiceErrorKind};
use articulate_interface::GenerativeService;
use async_trait::async_trait;
use derive_getters::Getters;
use reqwest::Client;
use std::env;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Client for the Gemini `generateContent` endpoint.
///
/// Holds no per-request state; clone or share it freely across tasks.
#[derive(Clone, Getters)]
pub struct GeminiClient {
    #[getter(skip)]
    client: Client,
    #[getter(skip)]
    api_key: String,
    /// Endpoint root without a trailing slash
    base_url: String,
    /// Model name as configured
    model: String,
    /// Sampling parameters sent with every request, if any were set
    generation_config: Option<GeminiGenerationConfig>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client from configuration.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the HTTP client cannot be built.
    #[instrument(name = "gemini_client_from_config", skip(config), fields(model = %config.model))]
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| ServiceError::new(ServiceErrorKind::MissingApiKey))?;
        Self::with_api_key(api_key, config)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(name = "gemini_client_with_api_key", skip_all, fields(model = %config.model))]
    pub fn with_api_key(
        api_key: impl Into<String>,
        config: &ServiceConfig,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| {
                ServiceError::new(ServiceErrorKind::Network(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        let generation_config =
            if config.temperature.is_some() || config.max_output_tokens.is_some() {
                Some(GeminiGenerationConfig {
                    temperature: config.temperature,
                    max_output_tokens: config.max_output_tokens,
                })
            } else {
                None
            };

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            generation_config,
        })
    }

    fn endpoint(&self) -> String {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Map a transport failure, keeping timeouts distinct.
    fn transport_error(err: reqwest::Error, started: Instant) -> ServiceError {
        if err.is_timeout() {
            ServiceError::new(ServiceErrorKind::Timeout {
                after_ms: started.elapsed().as_millis() as u64,
            })
        } else {
            ServiceError::new(ServiceErrorKind::Network(err.to_string()))
        }
    }

    /// Map a non-success status, preferring the message in the error envelope.
    fn status_error(status_code: u16, body: &str) -> ServiceError {
        let message = serde_json::from_str::<GeminiErrorBody>(body)
            .map(|envelope| {
                if envelope.error.status.is_empty() {
                    envelope.error.message
                } else {
                    format!("{}: {}", envelope.error.status, envelope.error.message)
                }
            })
            .unwrap_or_else(|_| body.to_string());
        ServiceError::new(ServiceErrorKind::from_status(status_code, message))
    }
}

#[async_trait]
impl GenerativeService for GeminiClient {
    #[instrument(
        skip(self, req),
        fields(
            model = %self.model,
            prompt_len = req.prompt().len(),
            grounding = *req.grounding_enabled(),
        )
    )]
    async fn generate(&self, req: &ServiceRequest) -> Result<ServiceResponse, ServiceError> {
        let body = GeminiRequest::from_service_request(req, self.generation_config);
        let url = self.endpoint();
        debug!(url = %url, "Sending Gemini API request");

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::transport_error(e, started))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let err = Self::status_error(status.as_u16(), &error_text);
            warn!(status = status.as_u16(), error = %err, "Gemini API returned an error");
            return Err(err);
        }

        let text = response
            .text()
            .await
            .map_err(|e| Self::transport_error(e, started))?;
        let parsed: GeminiResponse = serde_json::from_str(&text).map_err(|e| {
            ServiceError::new(ServiceErrorKind::MalformedResponse(format!(
                "Failed to decode response: {}",
                e
            )))
        })?;

        let converted = parsed.into_service_response()?;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            response_len = converted.text.len(),
            citations = converted.citations.len(),
            "Gemini API request completed"
        );
        Ok(converted)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
