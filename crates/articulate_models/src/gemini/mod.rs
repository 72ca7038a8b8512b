//! Google Gemini REST API client.
//!
//! Talks to `models/{model}:generateContent` directly over HTTPS so that the
//! `google_search` grounding tool and its citation metadata are available.

mod client;
mod dto;

pub use client::GeminiClient;
pub use dto::{
    GeminiCandidate, GeminiContent, GeminiErrorBody, GeminiErrorDetail, GeminiGenerationConfig,
    GeminiGroundingChunk, GeminiGroundingMetadata, GeminiPart, GeminiRequest, GeminiResponse,
    GeminiTool, GeminiWebChunk,
};
