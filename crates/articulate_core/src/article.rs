//! The structured article and its parts.

use crate::Validate;
use articulate_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// The canonical structured content unit.
///
/// Serialized with camelCase field names. `summary`, `sources`, `query` and
/// `referenceUrl` may be absent on input, which is how the generative service
/// usually answers; the pipeline fills `query` and `referenceUrl` itself.
///
/// # Examples
///
/// ```
/// use articulate_core::{Article, Section, Validate};
///
/// let article = Article {
///     title: "Rust in 2024".to_string(),
///     summary: String::new(),
///     sections: vec![Section::new("Overview", "Rust keeps growing.")],
///     sources: vec![],
///     query: "rust 2024".to_string(),
///     reference_url: None,
/// };
///
/// assert!(article.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Article headline
    pub title: String,
    /// Short overview shown above the sections
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    /// Ordered body sections
    pub sections: Vec<Section>,
    /// Works consulted; order carries no meaning
    #[serde(default)]
    pub sources: Vec<Source>,
    /// The topic the article was generated for
    #[serde(default)]
    pub query: String,
    /// Caller-supplied context URL
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "reference_url")]
    pub reference_url: Option<String>,
}

impl Article {
    /// The first section, if any.
    pub fn lead(&self) -> Option<&Section> {
        self.sections.first()
    }

    /// Headings in section order.
    pub fn headings(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.heading.as_str()).collect()
    }
}

impl Validate for Article {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyTitle));
        }
        if self.sections.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::NoSections));
        }
        Ok(())
    }
}

/// One headed block of article text.
///
/// `body` uses the markdown-lite subset understood by the renderer. The
/// service sometimes calls it `content`, which is accepted as an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading
    pub heading: String,
    /// Section text
    #[serde(default, alias = "content")]
    pub body: String,
    /// Short supporting points rendered as a list after the body
    #[serde(default)]
    pub subpoints: Vec<String>,
}

impl Section {
    /// Create a section without subpoints.
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
            subpoints: Vec::new(),
        }
    }

    /// Attach subpoints.
    pub fn with_subpoints(mut self, subpoints: Vec<String>) -> Self {
        self.subpoints = subpoints;
        self
    }
}

/// A work the article draws on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Source {
    /// Publication or page title
    #[serde(default, alias = "name")]
    pub title: String,
    /// Link to the work, possibly empty
    #[serde(default)]
    pub url: String,
    /// What the article took from it
    #[serde(default)]
    pub description: String,
}

impl Source {
    /// Key used to recognise the same source twice.
    ///
    /// The trimmed URL when there is one, otherwise the trimmed title.
    pub fn identity(&self) -> &str {
        let url = self.url.trim();
        if url.is_empty() {
            self.title.trim()
        } else {
            url
        }
    }
}
