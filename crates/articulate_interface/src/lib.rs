//! Trait definitions for the Articulate pipeline.
//!
//! The generative service is the only non-deterministic collaborator in the
//! pipeline. Everything behind [`GenerativeService`] is swappable: the Gemini
//! client in `articulate_models`, or a scripted mock in tests.

mod traits;

pub use traits::GenerativeService;
