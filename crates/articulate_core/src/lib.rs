//! Core data types for the Articulate article generation pipeline.
//!
//! This crate holds the values that flow between pipeline stages: the
//! structured [`Article`], its derived [`SeoMetadata`], the request and
//! response exchanged with a generative service, and the final
//! [`ArticleBundle`] handed back to callers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod article;
mod bundle;
mod seo;
mod service;
mod validate;

pub use article::{Article, Section, Source};
pub use bundle::ArticleBundle;
pub use seo::{OpenGraph, SeoMetadata, TwitterCard};
pub use service::{Citation, ServiceRequest, ServiceRequestBuilder, ServiceResponse};
pub use validate::Validate;
