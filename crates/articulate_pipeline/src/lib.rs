//! Article generation pipeline for Articulate.
//!
//! Turns a topic query, or an existing article plus an instruction, into
//! three correlated artifacts: a structured [`Article`](articulate_core::Article),
//! its [`SeoMetadata`](articulate_core::SeoMetadata), and a standalone HTML
//! document.
//!
//! The only non-deterministic step is the call through
//! [`GenerativeService`](articulate_interface::GenerativeService). Everything
//! else here is a pure function that can be tested without a live model:
//!
//! - [`PromptBuilder`] builds generation, regeneration and SEO prompts
//! - [`parse_article`] and [`parse_structured`] recover strict values from
//!   free-form replies
//! - [`fallback_metadata`] derives SEO metadata locally
//! - [`render_html`] assembles the document
//!
//! [`Orchestrator`] sequences a request and [`Pipeline`] is the public facade.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod extraction;
mod orchestrator;
mod pipeline;
mod prompt;
mod render;
mod seo;
mod text;

pub use config::PipelineConfig;
pub use extraction::{
    extract_balanced, merge_citations, parse_article, parse_structured, strip_fences,
};
pub use orchestrator::{
    Orchestrator, PromptStrategy, requests_heading_change, requests_structural_change,
};
pub use pipeline::Pipeline;
pub use prompt::{CORRECTION_SUFFIX, PromptBuilder, SEO_EXCERPT_CHARS, plain_text};
pub use render::{escape_html, markdown_lite, normalize_url, render_html};
pub use seo::{
    DESCRIPTION_MAX_CHARS, SeoGenerator, TITLE_MAX_CHARS, extract_keywords, fallback_metadata,
    normalize_metadata,
};
pub use text::{bullet_item, strip_markup, truncate_at_word_boundary};
