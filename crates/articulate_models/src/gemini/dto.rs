//! Gemini REST API data transfer objects.

use articulate_core::{Citation, ServiceRequest, ServiceResponse};
use articulate_error::{ServiceError, ServiceErrorKind};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One text part of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text content; absent for non-text parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiContent {
    /// "user" or "model"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Message parts
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A tool the model may use. Only search grounding is supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiTool {
    /// Enables Google Search grounding when present
    pub google_search: serde_json::Map<String, serde_json::Value>,
}

impl GeminiTool {
    /// The search grounding tool.
    pub fn google_search() -> Self {
        Self {
            google_search: serde_json::Map::new(),
        }
    }
}

/// Sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output token cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation turns
    contents: Vec<GeminiContent>,
    /// Tools offered to the model
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
    /// Sampling parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

impl GeminiRequest {
    /// Build the wire request for a pipeline request.
    ///
    /// The context URL is appended to the prompt unless the prompt already
    /// mentions it. Tools are only sent when grounding is enabled.
    pub fn from_service_request(
        req: &ServiceRequest,
        generation_config: Option<GeminiGenerationConfig>,
    ) -> Self {
        let mut text = req.prompt().clone();
        if let Some(url) = req.context_url() {
            if !text.contains(url.as_str()) {
                text.push_str("\n\nUse this URL as primary context: ");
                text.push_str(url);
            }
        }

        let tools = if *req.grounding_enabled() {
            vec![GeminiTool::google_search()]
        } else {
            Vec::new()
        };

        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: Some(text) }],
            }],
            tools,
            generation_config,
        }
    }
}

/// Web page referenced by grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiWebChunk {
    /// Page URL
    #[serde(default)]
    pub uri: String,
    /// Page title
    #[serde(default)]
    pub title: String,
}

/// One grounding reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiGroundingChunk {
    /// Web reference, if this chunk came from search
    #[serde(default)]
    pub web: Option<GeminiWebChunk>,
}

/// Grounding information attached to a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGroundingMetadata {
    /// References used to ground the answer
    #[serde(default)]
    pub grounding_chunks: Vec<GeminiGroundingChunk>,
}

/// One generated answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Generated message
    #[serde(default)]
    pub content: Option<GeminiContent>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
    /// Grounding references
    #[serde(default)]
    pub grounding_metadata: Option<GeminiGroundingMetadata>,
}

/// Body of a successful `generateContent` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeminiResponse {
    /// Generated answers, best first
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    /// Convert the first candidate into a pipeline response.
    ///
    /// Text parts are concatenated in order. Grounding chunks with a web URI
    /// become citations, deduplicated by URI.
    pub fn into_service_response(self) -> Result<ServiceResponse, ServiceError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::new(ServiceErrorKind::EmptyResponse))?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ServiceError::new(ServiceErrorKind::EmptyResponse));
        }

        let mut citations: Vec<Citation> = Vec::new();
        for web in candidate
            .grounding_metadata
            .unwrap_or_default()
            .grounding_chunks
            .into_iter()
            .filter_map(|chunk| chunk.web)
        {
            if web.uri.is_empty() || citations.iter().any(|c| c.url == web.uri) {
                continue;
            }
            citations.push(Citation {
                title: web.title,
                url: web.uri,
                description: String::new(),
            });
        }

        Ok(ServiceResponse { text, citations })
    }
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiErrorBody {
    /// Error details
    pub error: GeminiErrorDetail,
}

/// Error details inside [`GeminiErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiErrorDetail {
    /// HTTP status code echoed by the API
    #[serde(default)]
    pub code: u16,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Canonical status name, e.g. "RESOURCE_EXHAUSTED"
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(grounding: bool, url: Option<&str>) -> ServiceRequest {
        ServiceRequest::builder()
            .prompt("Write about tides")
            .context_url(url.map(str::to_string))
            .grounding_enabled(grounding)
            .build()
            .unwrap()
    }

    #[test]
    fn test_tools_omitted_without_grounding() {
        let body = GeminiRequest::from_service_request(&request(false, None), None);
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("tools").is_none());
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_grounding_adds_search_tool() {
        let body = GeminiRequest::from_service_request(&request(true, None), None);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["tools"][0]["google_search"], serde_json::json!({}));
    }

    #[test]
    fn test_context_url_appended_once() {
        let body = GeminiRequest::from_service_request(
            &request(false, Some("https://example.com/a")),
            None,
        );
        let text = body.contents()[0].parts[0].text.clone().unwrap();
        assert_eq!(text.matches("https://example.com/a").count(), 1);
    }

    #[test]
    fn test_response_text_and_citations() {
        let raw = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello "}, {"text": "world"}]},
                "finishReason": "STOP",
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://a.example", "title": "A"}},
                        {"web": {"uri": "https://a.example", "title": "A again"}},
                        {"web": {"uri": "https://b.example", "title": "B"}}
                    ]
                }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(raw).unwrap();
        let converted = response.into_service_response().unwrap();
        assert_eq!(converted.text, "Hello world");
        assert_eq!(converted.citations.len(), 2);
        assert_eq!(converted.citations[1].title, "B");
    }

    #[test]
    fn test_no_candidates_is_empty_response() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        let err = response.into_service_response().unwrap_err();
        assert_eq!(err.kind, ServiceErrorKind::EmptyResponse);
    }
}
