//! Recovering strict structured values from free-form service output.
//!
//! Generative services wrap JSON in markdown fences, surround it with
//! chatty prose, or emit it bare. Recovery runs in stages, each attempted
//! only if the previous one failed:
//!
//! 1. Strip a wrapping code fence (```` ```json ````, bare ```` ``` ````, or
//!    an unterminated trailing fence). Fences count only at the start of a
//!    line.
//! 2. Parse the remaining text directly and check the value's invariants.
//! 3. Parse the first balanced `{ ... }` span, ignoring surrounding prose.
//!    If the fenced payload yields nothing, the span search is repeated on
//!    the unstripped text.
//!
//! If all stages fail the caller receives a [`ParseError`] naming the stage.
//! No placeholder value is ever fabricated.

use articulate_core::{Article, Citation, Source, Validate};
use articulate_error::{ArticulateResult, ParseError, ParseErrorKind};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Parse an [`Article`] out of raw service text.
///
/// # Errors
///
/// Returns `ParseFailure` when no stage recovers an object and
/// `ValidationFailure` when the recovered article has no title or sections.
///
/// # Examples
///
/// ```
/// use articulate_pipeline::parse_article;
///
/// let raw = "Here is your article:\n\
///     {\"title\": \"Tides\", \"sections\": [{\"heading\": \"Why\", \"body\": \"The moon.\"}]}\n\
///     Hope this helps!";
/// let article = parse_article(raw).unwrap();
/// assert_eq!(article.title, "Tides");
/// ```
pub fn parse_article(raw: &str) -> ArticulateResult<Article> {
    parse_structured(raw)
}

/// Parse any validated structure out of raw service text.
///
/// # Errors
///
/// See [`parse_article`].
#[instrument(skip(raw), fields(raw_len = raw.len(), shape = std::any::type_name::<T>()))]
pub fn parse_structured<T>(raw: &str) -> ArticulateResult<T>
where
    T: DeserializeOwned + Validate,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyInput).into());
    }

    let payload = strip_fences(trimmed);

    let direct_error = match serde_json::from_str::<T>(payload) {
        Ok(value) => {
            value.validate()?;
            return Ok(value);
        }
        Err(e) => e.to_string(),
    };
    debug!(error = %direct_error, "Direct parse failed, trying brace-span recovery");

    let recovered = match recover_span::<T>(payload, direct_error) {
        // A fence-looking line inside prose can cut the object short.
        Err(kind) if payload.len() < trimmed.len() => {
            debug!("Fenced payload unrecoverable, retrying on the full text");
            match extract_balanced(trimmed, '{', '}').map(serde_json::from_str::<T>) {
                Some(Ok(value)) => Ok(value),
                _ => Err(kind),
            }
        }
        other => other,
    };

    let value = recovered.map_err(ParseError::new)?;
    value.validate()?;
    warn!("Recovered object from brace span");
    Ok(value)
}

fn recover_span<T>(text: &str, direct_error: String) -> Result<T, ParseErrorKind>
where
    T: DeserializeOwned,
{
    let Some(span) = extract_balanced(text, '{', '}') else {
        return Err(if text.contains('{') {
            ParseErrorKind::BraceRecovery("unbalanced braces".to_string())
        } else {
            ParseErrorKind::NoObjectFound
        });
    };

    // Recovery on the whole text would only repeat the direct attempt.
    if span.len() == text.len() {
        return Err(ParseErrorKind::DirectParse(direct_error));
    }

    serde_json::from_str::<T>(span).map_err(|e| {
        let preview: String = span.chars().take(100).collect();
        tracing::error!(error = %e, json_preview = %preview, "Brace-span recovery failed");
        ParseErrorKind::BraceRecovery(e.to_string())
    })
}

/// Remove a wrapping markdown code fence, if any.
///
/// Fences are only recognized at the start of a line, so backticks inside
/// JSON string values never open or close one. Text that already looks like
/// a bare JSON object is returned as-is.
pub fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    if text.starts_with('{') && text.ends_with('}') {
        return text;
    }

    let Some(start) = line_fence(text) else {
        return text;
    };
    let after = &text[start + 3..];

    // Skip a language tag such as `json`.
    let tag_len = after
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    let body = &after[tag_len..];

    match line_fence(body) {
        Some(end) => body[..end].trim(),
        // Truncated response: keep everything after the opening fence.
        None => body.trim(),
    }
}

/// Byte offset of the first ```` ``` ```` that opens a line, after indentation.
fn line_fence(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let content = line.trim_start();
        if content.starts_with("```") {
            return Some(offset + line.len() - content.len());
        }
        offset += line.len();
    }
    None
}

/// Find the first balanced `open ... close` span.
///
/// Delimiters inside JSON string literals are ignored, as are escaped quotes
/// within those literals.
pub fn extract_balanced(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text[start..].char_indices() {
        if in_string {
            if escape_next {
                escape_next = false;
            } else if ch == '\\' {
                escape_next = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Merge service citations into an article's sources.
///
/// Sources are deduplicated by trimmed URL, or by trimmed title when the URL
/// is empty. The first occurrence wins and first-appearance order is kept.
/// Entries with neither a URL nor a title are dropped.
pub fn merge_citations(sources: Vec<Source>, citations: Vec<Citation>) -> Vec<Source> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(sources.len() + citations.len());

    for source in sources
        .into_iter()
        .chain(citations.into_iter().map(Source::from))
    {
        let identity = source.identity().to_string();
        if identity.is_empty() || !seen.insert(identity) {
            continue;
        }
        merged.push(source);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use articulate_core::{SeoMetadata, Section};
    use articulate_error::{ArticulateErrorKind, ValidationErrorKind};

    const ARTICLE: &str = r#"{"title": "Tides", "sections": [{"heading": "Why", "body": "The moon."}]}"#;

    fn parse_kind(raw: &str) -> ParseErrorKind {
        match parse_article(raw).unwrap_err().kind() {
            ArticulateErrorKind::ParseFailure(e) => e.kind.clone(),
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn test_strip_json_fence() {
        let raw = format!("```json\n{}\n```", ARTICLE);
        assert_eq!(strip_fences(&raw), ARTICLE);
    }

    #[test]
    fn test_strip_bare_fence_with_prose() {
        let raw = format!("Sure!\n```\n{}\n```\nEnjoy.", ARTICLE);
        assert_eq!(strip_fences(&raw), ARTICLE);
    }

    #[test]
    fn test_strip_unterminated_fence() {
        let raw = format!("```json\n{}", ARTICLE);
        assert_eq!(strip_fences(&raw), ARTICLE);
    }

    #[test]
    fn test_bare_object_keeps_inner_backticks() {
        let raw = r#"{"title": "Code", "sections": [{"heading": "H", "body": "Use ```rust``` fences"}]}"#;
        assert_eq!(strip_fences(raw), raw);
        let article = parse_article(raw).unwrap();
        assert_eq!(article.sections[0].body, "Use ```rust``` fences");
    }

    #[test]
    fn test_prose_wrapped_object_keeps_inner_backticks() {
        let raw = r#"Here you go: {"title": "Code", "sections": [{"heading": "H", "body": "Use ```rust``` fences"}]} Enjoy."#;
        assert_eq!(strip_fences(raw), raw);
        let article = parse_article(raw).unwrap();
        assert_eq!(article.sections[0].body, "Use ```rust``` fences");
    }

    #[test]
    fn test_fenced_object_keeps_inner_backticks() {
        let inner = r#"{"title": "Code", "sections": [{"heading": "H", "body": "Run ```cargo``` first"}]}"#;
        let raw = format!("```json\n{}\n```", inner);
        assert_eq!(strip_fences(&raw), inner);
        let article = parse_article(&raw).unwrap();
        assert_eq!(article.sections[0].body, "Run ```cargo``` first");
    }

    #[test]
    fn test_mid_line_fence_falls_back_to_full_text() {
        let raw = format!("Answer: ```json\n{}\n```", ARTICLE);
        assert_eq!(parse_article(&raw).unwrap().title, "Tides");
    }

    #[test]
    fn test_balanced_span_ignores_braces_in_strings() {
        let text = r#"prefix {"a": "}{", "b": {"c": "\"}"}} suffix"#;
        assert_eq!(
            extract_balanced(text, '{', '}'),
            Some(r#"{"a": "}{", "b": {"c": "\"}"}}"#)
        );
    }

    #[test]
    fn test_backslash_outside_strings_is_literal() {
        let text = r#"C:\path {"a": 1}"#;
        assert_eq!(extract_balanced(text, '{', '}'), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_unbalanced_span_is_none() {
        assert_eq!(extract_balanced(r#"{"a": {"b": 1}"#, '{', '}'), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_kind("  \n "), ParseErrorKind::EmptyInput);
    }

    #[test]
    fn test_prose_without_object() {
        assert_eq!(
            parse_kind("I could not write that article."),
            ParseErrorKind::NoObjectFound
        );
    }

    #[test]
    fn test_truncated_object_names_recovery_stage() {
        assert!(matches!(
            parse_kind(r#"Here: {"title": "Tides", "sections": ["#),
            ParseErrorKind::BraceRecovery(_)
        ));
    }

    #[test]
    fn test_wrong_shape_names_direct_stage() {
        assert!(matches!(
            parse_kind(r#"{"headline": "Tides"}"#),
            ParseErrorKind::DirectParse(_)
        ));
    }

    #[test]
    fn test_sectionless_article_fails_validation() {
        let err = parse_article(r#"{"title": "Tides", "sections": []}"#).unwrap_err();
        match err.kind() {
            ArticulateErrorKind::ValidationFailure(e) => {
                assert_eq!(e.kind(), &ValidationErrorKind::NoSections)
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_generic_over_seo_metadata() {
        let raw = "```json\n{\"title\": \"Tides\", \"description\": \"How the moon moves water.\"}\n```";
        let seo: SeoMetadata = parse_structured(raw).unwrap();
        assert_eq!(seo.open_graph.kind, "article");
    }

    #[test]
    fn test_merge_dedupes_by_url_then_title() {
        let sources = vec![
            Source {
                title: "NOAA".to_string(),
                url: "https://noaa.gov/tides".to_string(),
                description: "Primary".to_string(),
            },
            Source {
                title: "Almanac".to_string(),
                url: String::new(),
                description: String::new(),
            },
        ];
        let citations = vec![
            Citation {
                title: "NOAA duplicate".to_string(),
                url: " https://noaa.gov/tides ".to_string(),
                description: String::new(),
            },
            Citation {
                title: "Almanac".to_string(),
                url: String::new(),
                description: String::new(),
            },
            Citation {
                title: "Nature".to_string(),
                url: "https://nature.com/moon".to_string(),
                description: String::new(),
            },
        ];

        let merged = merge_citations(sources, citations);
        let titles: Vec<_> = merged.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["NOAA", "Almanac", "Nature"]);
        assert_eq!(merged[0].description, "Primary");
    }

    #[test]
    fn test_round_trip_of_serialized_article() {
        let article = Article {
            title: "Tides".to_string(),
            summary: String::new(),
            sections: vec![Section::new("Why", "The **moon**.")],
            sources: Vec::new(),
            query: "tides".to_string(),
            reference_url: None,
        };
        let raw = serde_json::to_string(&article).unwrap();
        assert_eq!(parse_article(&raw).unwrap(), article);
    }
}
