//! Articulate - structured articles from a topic query.
//!
//! Articulate turns a free-text topic, with an optional reference URL, into
//! three correlated artifacts: a structured article, SEO metadata, and a
//! standalone HTML document. An existing article can be regenerated from a
//! natural-language instruction while keeping its shape.
//!
//! # Quick Start
//!
//! ```no_run
//! use articulate::{ArticulateConfig, pipeline_from_config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ArticulateConfig::load()?;
//! let pipeline = pipeline_from_config(&config, false)?;
//!
//! let bundle = pipeline.generate("Paris Olympics 2024", None).await?;
//! println!("{}", bundle.article.title);
//!
//! let revised = pipeline
//!     .regenerate(&bundle.article, "Make this more appealing to Gen Z")
//!     .await?;
//! println!("{}", revised.html);
//! # Ok(())
//! # }
//! ```
//!
//! # Cargo Features
//!
//! - `gemini` (default) - Google Gemini service client
//! - `observability` - OpenTelemetry span export to stdout
//!
//! # Architecture
//!
//! - `articulate_error` - Error types
//! - `articulate_core` - Article, SEO metadata and service DTOs
//! - `articulate_interface` - `GenerativeService` trait
//! - `articulate_models` - Service clients
//! - `articulate_pipeline` - Prompting, recovery, SEO and rendering
//!
//! This crate re-exports everything and adds configuration, logging setup,
//! file output and the `articulate` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;
mod output;

pub use config::{ArticulateConfig, LoggingConfig};
pub use observability::{ObservabilityConfig, init_observability};
pub use output::{
    ARTICLE_FILE, HTML_FILE, SEO_FILE, WrittenBundle, read_article, read_seo, render_offline,
    write_bundle,
};

pub use articulate_core::*;
pub use articulate_error::*;
pub use articulate_interface::*;
pub use articulate_models::*;
pub use articulate_pipeline::*;

/// Build a pipeline backed by the configured generative service.
///
/// Grounding is enabled when either the configuration or
/// `force_grounding` asks for it.
///
/// # Errors
///
/// Returns an error if the service client cannot be created, for example
/// when `GEMINI_API_KEY` is unset.
#[cfg(feature = "gemini")]
pub fn pipeline_from_config(
    config: &ArticulateConfig,
    force_grounding: bool,
) -> ArticulateResult<Pipeline> {
    let client = GeminiClient::from_config(&config.service)?;
    Ok(
        Pipeline::new(std::sync::Arc::new(client), config.pipeline.clone())
            .with_grounding(config.service.grounding || force_grounding),
    )
}

/// Build a pipeline backed by the configured generative service.
///
/// # Errors
///
/// Always fails: this build has no service client.
#[cfg(not(feature = "gemini"))]
pub fn pipeline_from_config(
    _config: &ArticulateConfig,
    _force_grounding: bool,
) -> ArticulateResult<Pipeline> {
    Err(ConfigError::new(
        "No generative service available; rebuild with the `gemini` feature",
    )
    .into())
}
