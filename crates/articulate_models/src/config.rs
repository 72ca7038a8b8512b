//! Settings for talking to a generative service.

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Provider settings, loaded from the `[service]` table.
///
/// The API key is deliberately absent; it is read from the environment.
///
/// ```toml
/// [service]
/// model = "gemini-2.5-flash"
/// grounding = false
/// temperature = 0.7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// REST API root, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Allow web-search grounding
    #[serde(default)]
    pub grounding: bool,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens the model may produce
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Seconds allowed to establish a connection
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            grounding: false,
            temperature: None,
            max_output_tokens: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}
