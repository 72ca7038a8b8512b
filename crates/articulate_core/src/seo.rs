//! Search and social metadata derived from an article.

use crate::Validate;
use articulate_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

fn default_og_type() -> String {
    "article".to_string()
}

fn default_card_type() -> String {
    "summary_large_image".to_string()
}

/// Bounded metadata describing an article to search engines and social sites.
///
/// Never hand-authored: it is either produced by the generative service and
/// normalised, or derived deterministically from the article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    /// Page title, at most 60 characters
    pub title: String,
    /// Meta description, at most 160 characters
    pub description: String,
    /// Keywords, most relevant first
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Open Graph tags
    #[serde(default)]
    pub open_graph: OpenGraph,
    /// Twitter Card tags
    #[serde(default)]
    pub twitter_card: TwitterCard,
}

impl Validate for SeoMetadata {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptySeoField(
                "title",
            )));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptySeoField(
                "description",
            )));
        }
        Ok(())
    }
}

/// Open Graph protocol fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraph {
    /// `og:title`
    #[serde(default)]
    pub title: String,
    /// `og:description`
    #[serde(default)]
    pub description: String,
    /// `og:type`
    #[serde(rename = "type", default = "default_og_type")]
    pub kind: String,
}

impl Default for OpenGraph {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            kind: default_og_type(),
        }
    }
}

/// Twitter Card fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwitterCard {
    /// `twitter:title`
    #[serde(default)]
    pub title: String,
    /// `twitter:description`
    #[serde(default)]
    pub description: String,
    /// `twitter:card`
    #[serde(default = "default_card_type")]
    pub card_type: String,
}

impl Default for TwitterCard {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            card_type: default_card_type(),
        }
    }
}
