//! SEO metadata derivation.
//!
//! [`SeoGenerator::generate`] never fails outward. When the service path is
//! disabled or fails for any reason, [`fallback_metadata`] derives bounded
//! metadata from the article itself.

use crate::Orchestrator;
use crate::prompt::plain_text;
use crate::text::{strip_markup, truncate_at_word_boundary};
use articulate_core::{Article, OpenGraph, SeoMetadata, TwitterCard};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, warn};

/// Maximum SEO title length in characters.
pub const TITLE_MAX_CHARS: usize = 60;

/// Maximum SEO description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 160;

const DEFAULT_OG_TYPE: &str = "article";
const DEFAULT_CARD_TYPE: &str = "summary_large_image";

const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "are", "as", "at", "be", "been", "before",
    "but", "by", "can", "did", "do", "does", "for", "from", "had", "has", "have", "he", "her",
    "his", "how", "if", "in", "into", "is", "it", "its", "more", "most", "new", "not", "of", "on",
    "or", "our", "over", "she", "so", "some", "such", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "those", "through", "to", "under", "up", "was",
    "we", "were", "what", "when", "where", "which", "while", "who", "why", "will", "with",
    "would", "you", "your",
];

/// Produces SEO metadata for an article.
#[derive(Debug, Clone)]
pub struct SeoGenerator {
    orchestrator: Option<Orchestrator>,
    keyword_limit: usize,
}

impl SeoGenerator {
    /// Ask the service for metadata, falling back locally on failure.
    pub fn new(orchestrator: Orchestrator, keyword_limit: usize) -> Self {
        Self {
            orchestrator: Some(orchestrator),
            keyword_limit,
        }
    }

    /// Always derive metadata locally.
    pub fn offline(keyword_limit: usize) -> Self {
        Self {
            orchestrator: None,
            keyword_limit,
        }
    }

    /// Metadata for `article`. Always returns a valid value.
    #[instrument(skip_all, fields(title = %article.title))]
    pub async fn generate(&self, article: &Article) -> SeoMetadata {
        let Some(orchestrator) = &self.orchestrator else {
            debug!("Deriving SEO metadata locally");
            return fallback_metadata(article, self.keyword_limit);
        };

        let prompt = orchestrator.prompts().seo(article);
        match orchestrator
            .request_structured::<SeoMetadata>(&prompt, None)
            .await
        {
            Ok((metadata, _)) => normalize_metadata(metadata, article, self.keyword_limit),
            Err(e) => {
                warn!(error = %e, category = e.category(), "SEO generation failed, using fallback");
                fallback_metadata(article, self.keyword_limit)
            }
        }
    }
}

/// Deterministic metadata derived from the article alone.
///
/// The title comes from the article title and the description from the
/// first section, both cut at word boundaries to their length limits.
pub fn fallback_metadata(article: &Article, keyword_limit: usize) -> SeoMetadata {
    let title = match truncate_at_word_boundary(&article.title, TITLE_MAX_CHARS) {
        t if t.is_empty() => "Article".to_string(),
        t => t,
    };

    let lead = article
        .lead()
        .map(|section| strip_markup(&section.body))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| plain_text(article));
    let description = match truncate_at_word_boundary(&lead, DESCRIPTION_MAX_CHARS) {
        d if d.is_empty() => truncate_at_word_boundary(&title, DESCRIPTION_MAX_CHARS),
        d => d,
    };

    SeoMetadata {
        keywords: extract_keywords(article, keyword_limit),
        open_graph: OpenGraph {
            title: title.clone(),
            description: description.clone(),
            kind: DEFAULT_OG_TYPE.to_string(),
        },
        twitter_card: TwitterCard {
            title: title.clone(),
            description: description.clone(),
            card_type: DEFAULT_CARD_TYPE.to_string(),
        },
        title,
        description,
    }
}

/// Bring service-produced metadata within bounds.
///
/// Fields are trimmed and cut to length, keywords are deduplicated
/// case-insensitively and capped, and empty fields are filled from the
/// top-level title and description or from [`fallback_metadata`].
pub fn normalize_metadata(
    metadata: SeoMetadata,
    article: &Article,
    keyword_limit: usize,
) -> SeoMetadata {
    let fallback = fallback_metadata(article, keyword_limit);

    let title = match truncate_at_word_boundary(&metadata.title, TITLE_MAX_CHARS) {
        t if t.is_empty() => fallback.title,
        t => t,
    };
    let description = match truncate_at_word_boundary(&metadata.description, DESCRIPTION_MAX_CHARS)
    {
        d if d.is_empty() => fallback.description,
        d => d,
    };

    let mut keywords = dedupe_keywords(metadata.keywords, keyword_limit);
    if keywords.is_empty() {
        keywords = fallback.keywords;
    }

    SeoMetadata {
        open_graph: OpenGraph {
            title: or_default(&metadata.open_graph.title, &title),
            description: or_default(&metadata.open_graph.description, &description),
            kind: or_default(&metadata.open_graph.kind, DEFAULT_OG_TYPE),
        },
        twitter_card: TwitterCard {
            title: or_default(&metadata.twitter_card.title, &title),
            description: or_default(&metadata.twitter_card.description, &description),
            card_type: or_default(&metadata.twitter_card.card_type, DEFAULT_CARD_TYPE),
        },
        title,
        description,
        keywords,
    }
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn dedupe_keywords(keywords: Vec<String>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .map(|k| k.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|k| !k.is_empty() && seen.insert(k.to_lowercase()))
        .take(limit)
        .collect()
}

fn is_year(token: &str) -> bool {
    token.len() == 4 && token.starts_with("20") && token.bytes().all(|b| b.is_ascii_digit())
}

/// Frequency-ranked keywords from the title and first section.
///
/// Candidates are title words, capitalized words and repeated words, minus
/// stopwords. Title words score higher. Ties keep first-appearance order.
pub fn extract_keywords(article: &Article, limit: usize) -> Vec<String> {
    let title_text = strip_markup(&article.title);
    let lead_text = article
        .lead()
        .map(|section| {
            let mut text = strip_markup(&section.body);
            for subpoint in &section.subpoints {
                text.push(' ');
                text.push_str(&strip_markup(subpoint));
            }
            text
        })
        .unwrap_or_default();

    struct Candidate {
        display: String,
        count: usize,
        in_title: bool,
        capitalized: bool,
    }

    let mut order: Vec<String> = Vec::new();
    let mut candidates: HashMap<String, Candidate> = HashMap::new();

    for (text, from_title) in [(title_text.as_str(), true), (lead_text.as_str(), false)] {
        for raw in text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-')) {
            let token = raw.trim_matches(|c| c == '\'' || c == '-');
            let token = token.strip_suffix("'s").unwrap_or(token);
            if token.chars().count() < 3 {
                continue;
            }
            if !token.chars().any(char::is_alphabetic) && !is_year(token) {
                continue;
            }
            let key = token.to_lowercase();
            if STOPWORDS.contains(&key.as_str()) {
                continue;
            }

            let capitalized = token.chars().next().is_some_and(char::is_uppercase);
            let entry = candidates.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                Candidate {
                    display: token.to_string(),
                    count: 0,
                    in_title: false,
                    capitalized: false,
                }
            });
            entry.count += 1;
            entry.in_title |= from_title;
            entry.capitalized |= capitalized;
        }
    }

    let mut ranked: Vec<(usize, &Candidate)> = order
        .iter()
        .filter_map(|key| candidates.get(key))
        .filter(|c| c.in_title || c.capitalized || c.count >= 2)
        .map(|c| (c.count + if c.in_title { 2 } else { 0 }, c))
        .collect();
    // Stable sort keeps first-appearance order among equal scores.
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    ranked
        .into_iter()
        .take(limit)
        .map(|(_, c)| c.display.clone())
        .collect()
}
