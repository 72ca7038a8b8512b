//! Prompt construction for generation, regeneration and SEO.
//!
//! Every prompt ends with an explicit output contract: a single JSON object
//! in a fixed shape. [`PromptBuilder`] is pure; the current date is passed in
//! rather than read from the clock.

use crate::text::strip_markup;
use articulate_core::Article;
use articulate_error::JsonError;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b20\d{2}\b").expect("valid year pattern"));

const WRITING_GUIDELINES: &str = "Guidelines:
- Write 3-5 logical sections, each with a clear heading.
- Use **bold** for key terms, names and important concepts.
- For lists, put each item on its own line starting with \"* \".
- Keep dates and events accurate for the period discussed.
- List the real sources you relied on in \"sources\". If you have no URL for a source, give the publication name and a description.";

const ARTICLE_SHAPE: &str = r#"{
  "title": "Article title",
  "summary": "One or two sentence overview",
  "sections": [
    {
      "heading": "Section heading",
      "body": "Paragraph text with **bold** key terms.\n* A list item\n* Another list item",
      "subpoints": ["Optional short takeaway"]
    }
  ],
  "sources": [
    {
      "title": "Publication or page title",
      "url": "https://example.com/article",
      "description": "What this source contributed"
    }
  ]
}"#;

const SEO_SHAPE: &str = r#"{
  "title": "Search title, at most 60 characters",
  "description": "Meta description, at most 160 characters",
  "keywords": ["most relevant", "second", "third"],
  "openGraph": {
    "title": "Open Graph title",
    "description": "Open Graph description",
    "type": "article"
  },
  "twitterCard": {
    "title": "Twitter title",
    "description": "Twitter description",
    "cardType": "summary_large_image"
  }
}"#;

const JSON_ONLY: &str =
    "Respond with a single JSON object and nothing else. Do not wrap it in markdown.";

/// Appended to a prompt when the previous reply could not be parsed.
pub const CORRECTION_SUFFIX: &str = "\n\nYour previous reply could not be read as the requested JSON object. Return valid JSON only, with no commentary before or after it.";

/// Characters of article text shown to the service when asking for SEO metadata.
pub const SEO_EXCERPT_CHARS: usize = 1000;

/// Builds prompt strings for the generative service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptBuilder {
    today: NaiveDate,
}

impl PromptBuilder {
    /// Create a builder anchored to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// The date used for temporal framing.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// First explicit year (2000-2099) mentioned in the query.
    pub fn detect_year(query: &str) -> Option<&str> {
        YEAR_PATTERN.find(query).map(|m| m.as_str())
    }

    fn temporal_context(&self, query: &str) -> String {
        let today = self.today.format("%B %-d, %Y");
        match Self::detect_year(query) {
            Some(year) => format!(
                "Today is {today}. The topic mentions {year}: focus on events and information from {year}."
            ),
            None => format!(
                "Today is {today}. Prioritise the most recent information available. Use historical information only if nothing newer exists."
            ),
        }
    }

    /// Prompt for a fresh article about `query`.
    pub fn fresh(&self, query: &str, reference_url: Option<&str>) -> String {
        let mut prompt = format!(
            "Write a comprehensive, well-structured article about: {query}

{temporal}

{guidelines}",
            query = query.trim(),
            temporal = self.temporal_context(query),
            guidelines = WRITING_GUIDELINES,
        );

        if let Some(url) = reference_url {
            prompt.push_str(&format!("\n\nUse this URL as primary context: {}", url));
        }

        prompt.push_str(&format!(
            "\n\n{json_only} Use exactly this shape:\n{shape}",
            json_only = JSON_ONLY,
            shape = ARTICLE_SHAPE,
        ));
        prompt
    }

    /// Prompt for modifying `article` according to `instruction`.
    ///
    /// The existing article is embedded verbatim as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the article cannot be serialized.
    pub fn regenerate(&self, article: &Article, instruction: &str) -> Result<String, JsonError> {
        let existing = serde_json::to_string_pretty(article)
            .map_err(|e| JsonError::new(format!("Failed to serialize article: {}", e)))?;

        Ok(format!(
            "Modify the existing article below according to this instruction.

Instruction: {instruction}

Existing article:
{existing}

Rules:
- Keep exactly the same field names as the existing article.
- Keep the same number of sections, in the same order, unless the instruction explicitly asks for a structural change.
- Keep the existing section headings unless the instruction asks to change them.
- Preserve the core information and sources unless the instruction says otherwise.
- Keep **bold** for key terms and \"* \" at the start of list items.

{temporal}

{json_only} Use the same shape as the existing article.",
            instruction = instruction.trim(),
            existing = existing,
            temporal = self.temporal_context(&article.query),
            json_only = JSON_ONLY,
        ))
    }

    /// Prompt for SEO metadata describing `article`.
    pub fn seo(&self, article: &Article) -> String {
        let excerpt: String = plain_text(article).chars().take(SEO_EXCERPT_CHARS).collect();
        format!(
            "Generate SEO metadata for the article below.

Title: {title}
Content: {excerpt}

Constraints:
- \"title\" is at most 60 characters.
- \"description\" is at most 160 characters.
- \"keywords\" lists 3-8 search terms, most relevant first.

{json_only} Use exactly this shape:
{shape}",
            title = article.title,
            excerpt = excerpt,
            json_only = JSON_ONLY,
            shape = SEO_SHAPE,
        )
    }

    /// `prompt` with a "return valid JSON only" correction appended.
    pub fn with_correction(prompt: &str) -> String {
        format!("{}{}", prompt, CORRECTION_SUFFIX)
    }
}

/// Markup-free article text: section bodies and subpoints in order.
pub fn plain_text(article: &Article) -> String {
    article
        .sections
        .iter()
        .flat_map(|section| {
            std::iter::once(section.body.as_str())
                .chain(section.subpoints.iter().map(String::as_str))
        })
        .map(strip_markup)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
