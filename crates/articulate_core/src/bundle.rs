//! The three correlated artifacts returned per request.

use crate::{Article, SeoMetadata};
use serde::{Deserialize, Serialize};

/// Article, metadata and HTML produced together by one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleBundle {
    /// The structured article
    pub article: Article,
    /// Metadata derived from the article
    pub seo_metadata: SeoMetadata,
    /// Standalone HTML document
    pub html: String,
}
