//! Pipeline tuning, loaded from the `[pipeline]` table.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_seo_via_service() -> bool {
    true
}

fn default_keyword_limit() -> usize {
    8
}

/// Deadlines, retry policy and SEO behaviour for a [`crate::Pipeline`].
///
/// ```toml
/// [pipeline]
/// request_timeout_secs = 120
/// parse_retries = 0
/// seo_via_service = true
/// keyword_limit = 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Deadline for a single generative service call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Extra "return valid JSON only" attempts after a parse failure (at most one is made)
    #[serde(default)]
    pub parse_retries: u32,
    /// Ask the service for SEO metadata instead of deriving it locally
    #[serde(default = "default_seo_via_service")]
    pub seo_via_service: bool,
    /// Maximum number of keywords kept in SEO metadata
    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: usize,
}

impl PipelineConfig {
    /// The request deadline as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            parse_retries: 0,
            seo_via_service: default_seo_via_service(),
            keyword_limit: default_keyword_limit(),
        }
    }
}
