//! Generative service integrations for Articulate.
//!
//! Each provider lives behind its own feature flag.
//!
//! # Available Providers
//!
//! - **Gemini** (Google) - Enable with `gemini` feature
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "gemini")]
//! # {
//! use articulate_core::ServiceRequest;
//! use articulate_interface::GenerativeService;
//! use articulate_models::{GeminiClient, ServiceConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::from_config(&ServiceConfig::default())?;
//! let request = ServiceRequest::builder().prompt("Say hello").build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::ServiceConfig;

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{
    GeminiCandidate, GeminiClient, GeminiContent, GeminiErrorBody, GeminiErrorDetail,
    GeminiGenerationConfig, GeminiGroundingChunk, GeminiGroundingMetadata, GeminiPart,
    GeminiRequest, GeminiResponse, GeminiTool, GeminiWebChunk,
};
