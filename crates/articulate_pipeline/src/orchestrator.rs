//! Sequencing prompt construction, the service call and response recovery.
//!
//! Fresh generation and regeneration share one code path, parameterized by
//! [`PromptStrategy`]. Only the prompt and the post-parse checks differ.

use crate::extraction::{merge_citations, parse_structured};
use crate::{PipelineConfig, PromptBuilder};
use articulate_core::{Article, Citation, ServiceRequest, ServiceResponse, Validate};
use articulate_error::{
    ArticulateErrorKind, ArticulateResult, TimeoutError, ValidationError, ValidationErrorKind,
};
use articulate_interface::GenerativeService;
use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Correction re-prompts are capped at one regardless of configuration.
const MAX_PARSE_RETRIES: u32 = 1;

const STRUCTURAL_PHRASES: &[&str] = &[
    "split",
    "merge",
    "combine",
    "restructure",
    "reorganize",
    "reorganise",
    "condense into",
    "expand into",
    "more sections",
    "add a section",
    "add section",
    "add another section",
    "new section",
    "extra section",
];

const HEADING_PHRASES: &[&str] = &["heading", "headline", "title", "rename", "retitle"];

static SECTION_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(one|two|three|four|five|six|seven|eight|nine|ten|single|\d+)\s+sections?\b")
        .expect("valid section count pattern")
});

// Removal verbs only count when their object is a section-like unit.
static SECTION_REMOVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(remove|delete|drop|cut|fewer)\s+(\w+\s+){0,2}(sections?|parts?|paragraphs?)\b")
        .expect("valid section removal pattern")
});

/// Whether an instruction asks for a different number of sections.
pub fn requests_structural_change(instruction: &str) -> bool {
    let lower = instruction.to_lowercase();
    STRUCTURAL_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
        || SECTION_COUNT.is_match(&lower)
        || SECTION_REMOVAL.is_match(&lower)
}

/// Whether an instruction asks for section headings to change.
pub fn requests_heading_change(instruction: &str) -> bool {
    let lower = instruction.to_lowercase();
    HEADING_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Which prompt variant to build.
#[derive(Debug, Clone, Copy)]
pub enum PromptStrategy<'a> {
    /// A new article about a topic.
    Fresh {
        /// Topic query
        query: &'a str,
        /// Optional context URL
        reference_url: Option<&'a str>,
    },
    /// A modified copy of an existing article.
    Modify {
        /// Article to modify
        article: &'a Article,
        /// Natural-language modification instruction
        instruction: &'a str,
    },
}

/// Drives prompt, service call and parser for one request at a time.
///
/// Holds no per-request state, so a single instance serves concurrent
/// requests.
#[derive(Clone)]
pub struct Orchestrator {
    service: Arc<dyn GenerativeService>,
    timeout: Duration,
    parse_retries: u32,
    grounding: bool,
    today: Option<NaiveDate>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("provider", &self.service.provider_name())
            .field("model", &self.service.model_name())
            .field("timeout", &self.timeout)
            .field("parse_retries", &self.parse_retries)
            .field("grounding", &self.grounding)
            .field("today", &self.today)
            .finish()
    }
}

impl Orchestrator {
    /// Create an orchestrator around a service.
    pub fn new(service: Arc<dyn GenerativeService>, config: &PipelineConfig) -> Self {
        Self {
            service,
            timeout: config.request_timeout(),
            parse_retries: config.parse_retries.min(MAX_PARSE_RETRIES),
            grounding: false,
            today: None,
        }
    }

    /// Request web-search grounding on every call.
    pub fn with_grounding(mut self, enabled: bool) -> Self {
        self.grounding = enabled;
        self
    }

    /// Pin the date used for temporal framing instead of reading the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Prompt builder anchored to the pinned date, or today in UTC.
    pub fn prompts(&self) -> PromptBuilder {
        PromptBuilder::new(self.today.unwrap_or_else(|| Utc::now().date_naive()))
    }

    /// Call the service once, bounded by the request deadline.
    ///
    /// # Errors
    ///
    /// Returns `ServiceTimeout` when the deadline passes and
    /// `ServiceUnavailable` for network, auth or quota failures.
    #[instrument(
        skip(self, prompt),
        fields(
            provider = self.service.provider_name(),
            prompt_len = prompt.len(),
            timeout_ms = self.timeout.as_millis() as u64,
        )
    )]
    pub async fn call(
        &self,
        prompt: &str,
        context_url: Option<&str>,
    ) -> ArticulateResult<ServiceResponse> {
        let request = ServiceRequest::builder()
            .prompt(prompt)
            .context_url(context_url.map(str::to_string))
            .grounding_enabled(self.grounding)
            .build()
            .map_err(|e| {
                ValidationError::new(ValidationErrorKind::IncompleteRequest(e.to_string()))
            })?;

        match tokio::time::timeout(self.timeout, self.service.generate(&request)).await {
            Ok(Ok(response)) => {
                debug!(
                    response_len = response.text.len(),
                    citations = response.citations.len(),
                    "Service call succeeded"
                );
                Ok(response)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Service call failed");
                Err(e.into())
            }
            Err(_) => {
                let deadline_ms = self.timeout.as_millis() as u64;
                warn!(deadline_ms, "Service call timed out");
                Err(TimeoutError::new(deadline_ms).into())
            }
        }
    }

    /// Call the service and recover a validated `T` from its reply.
    ///
    /// When `parse_retries` is non-zero, a reply that cannot be parsed or
    /// validated triggers a single re-prompt with a "valid JSON only"
    /// correction. Service failures are never retried here.
    ///
    /// # Errors
    ///
    /// Propagates service, timeout, parse and validation failures.
    pub async fn request_structured<T>(
        &self,
        prompt: &str,
        context_url: Option<&str>,
    ) -> ArticulateResult<(T, Vec<Citation>)>
    where
        T: DeserializeOwned + Validate,
    {
        let mut attempt = 0;
        let mut current = prompt.to_string();
        loop {
            let response = self.call(&current, context_url).await?;
            match parse_structured::<T>(&response.text) {
                Ok(value) => return Ok((value, response.citations)),
                Err(e) => {
                    let recoverable = matches!(
                        e.kind(),
                        ArticulateErrorKind::ParseFailure(_)
                            | ArticulateErrorKind::ValidationFailure(_)
                    );
                    if !recoverable || attempt >= self.parse_retries {
                        return Err(e);
                    }
                    attempt += 1;
                    warn!(attempt, error = %e, "Unparseable reply, re-prompting with correction");
                    current = PromptBuilder::with_correction(prompt);
                }
            }
        }
    }

    /// Produce an article for either strategy.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` for an empty query or instruction before
    /// any service call, and when a regeneration changes the section count
    /// without being asked to. Other failures propagate from
    /// [`Orchestrator::request_structured`].
    #[instrument(skip_all, fields(strategy = strategy.name()))]
    pub async fn run(&self, strategy: PromptStrategy<'_>) -> ArticulateResult<Article> {
        let prompts = self.prompts();
        let (prompt, context_url) = match strategy {
            PromptStrategy::Fresh {
                query,
                reference_url,
            } => {
                if query.trim().is_empty() {
                    return Err(ValidationError::new(ValidationErrorKind::EmptyQuery).into());
                }
                (prompts.fresh(query, reference_url), reference_url)
            }
            PromptStrategy::Modify {
                article,
                instruction,
            } => {
                if instruction.trim().is_empty() {
                    return Err(ValidationError::new(ValidationErrorKind::EmptyInstruction).into());
                }
                (
                    prompts.regenerate(article, instruction)?,
                    article.reference_url.as_deref(),
                )
            }
        };

        let (mut article, citations) = self
            .request_structured::<Article>(&prompt, context_url)
            .await?;
        article.sources = merge_citations(std::mem::take(&mut article.sources), citations);

        match strategy {
            PromptStrategy::Fresh {
                query,
                reference_url,
            } => {
                article.query = query.trim().to_string();
                article.reference_url = reference_url.map(str::to_string);
            }
            PromptStrategy::Modify {
                article: original,
                instruction,
            } => {
                check_shape(original, &article, instruction)?;
                article.query = original.query.clone();
                article.reference_url = original.reference_url.clone();
            }
        }

        info!(
            title = %article.title,
            sections = article.sections.len(),
            sources = article.sources.len(),
            "Article ready"
        );
        Ok(article)
    }
}

impl PromptStrategy<'_> {
    fn name(&self) -> &'static str {
        match self {
            Self::Fresh { .. } => "fresh",
            Self::Modify { .. } => "modify",
        }
    }
}

fn check_shape(
    original: &Article,
    regenerated: &Article,
    instruction: &str,
) -> Result<(), ValidationError> {
    if requests_structural_change(instruction) {
        return Ok(());
    }

    let expected = original.sections.len();
    let actual = regenerated.sections.len();
    if expected != actual {
        warn!(expected, actual, "Regeneration changed the article shape");
        return Err(ValidationError::new(ValidationErrorKind::ShapeChanged {
            expected,
            actual,
        }));
    }

    if requests_heading_change(instruction) {
        return Ok(());
    }
    let renamed = original
        .headings()
        .into_iter()
        .zip(regenerated.headings())
        .find(|(before, after)| !before.trim().eq_ignore_ascii_case(after.trim()));
    if let Some((before, after)) = renamed {
        warn!(expected = before, actual = after, "Regeneration renamed a section");
        return Err(ValidationError::new(ValidationErrorKind::HeadingsChanged {
            expected: before.to_string(),
            actual: after.to_string(),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use articulate_core::Section;

    #[test]
    fn test_structural_instructions() {
        assert!(requests_structural_change("Split this into three sections"));
        assert!(requests_structural_change("Please MERGE the last two parts"));
        assert!(requests_structural_change("rewrite it as 4 sections"));
        assert!(requests_structural_change("remove the history part"));
        assert!(requests_structural_change("Use fewer sections"));
        assert!(requests_structural_change("drop the last paragraph"));
    }

    #[test]
    fn test_cosmetic_instructions() {
        assert!(!requests_structural_change("fix a typo"));
        assert!(!requests_structural_change("Make this more appealing to Gen Z"));
        assert!(!requests_structural_change("tighten the wording in every section"));
        assert!(!requests_structural_change("drop the jargon"));
        assert!(!requests_structural_change("remove the typo"));
        assert!(!requests_structural_change("fewer adjectives"));
        assert!(!requests_structural_change("remove the typo in section 2"));
    }

    #[test]
    fn test_heading_instructions() {
        assert!(requests_heading_change("Give the sections catchier headings"));
        assert!(requests_heading_change("rename the legacy part"));
        assert!(!requests_heading_change("fix a typo"));
    }

    #[test]
    fn test_check_shape_flags_renamed_heading() {
        let original = Article {
            title: "Tides".to_string(),
            summary: String::new(),
            sections: vec![Section::new("Why", "The moon."), Section::new("When", "Twice daily.")],
            sources: Vec::new(),
            query: "tides".to_string(),
            reference_url: None,
        };
        let mut regenerated = original.clone();
        regenerated.sections[1].heading = "  when ".to_string();
        assert!(check_shape(&original, &regenerated, "fix a typo").is_ok());

        regenerated.sections[1].heading = "Timing".to_string();
        let err = check_shape(&original, &regenerated, "fix a typo").unwrap_err();
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::HeadingsChanged {
                expected: "When".to_string(),
                actual: "Timing".to_string(),
            }
        );
        assert!(check_shape(&original, &regenerated, "make the headings punchier").is_ok());
    }
}
