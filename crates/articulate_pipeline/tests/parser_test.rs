//! Recovery of articles from the shapes generative services actually reply with.

mod test_utils;

use articulate_error::{ArticulateErrorKind, ParseErrorKind};
use articulate_pipeline::parse_article;
use test_utils::{as_reply, sample_article};

#[test]
fn test_serialized_article_parses_unchanged() -> anyhow::Result<()> {
    let article = sample_article();
    assert_eq!(parse_article(&as_reply(&article))?, article);
    assert_eq!(parse_article(&serde_json::to_string(&article)?)?, article);
    Ok(())
}

#[test]
fn test_fenced_reply_equals_bare_reply() -> anyhow::Result<()> {
    let bare = as_reply(&sample_article());
    for fenced in [
        format!("```json\n{}\n```", bare),
        format!("```JSON\n{}\n```", bare),
        format!("```\n{}\n```", bare),
        format!("Sure, here it is:\n```json\n{}\n```\nLet me know!", bare),
        format!("```json\n{}", bare),
    ] {
        assert_eq!(parse_article(&fenced)?, parse_article(&bare)?);
    }
    Ok(())
}

#[test]
fn test_backticks_inside_bodies_survive_every_wrapping() -> anyhow::Result<()> {
    let mut article = sample_article();
    article.sections[0].body = "Wrap snippets in ```rust``` blocks.".to_string();
    let bare = as_reply(&article);
    for raw in [
        format!("Here is the article: {} Hope this helps!", bare),
        format!("```json\n{}\n```", bare),
        format!("Sure:\n```\n{}\n```\nDone.", bare),
    ] {
        assert_eq!(parse_article(&raw)?, article);
    }
    Ok(())
}

#[test]
fn test_brace_span_ignores_surrounding_prose() -> anyhow::Result<()> {
    let article = sample_article();
    let raw = format!("Here is your article:\n{}\nHope this helps!", as_reply(&article));
    assert_eq!(parse_article(&raw)?, article);
    Ok(())
}

#[test]
fn test_tolerates_loose_field_names() -> anyhow::Result<()> {
    let raw = r#"{
        "title": "Tides",
        "content": "ignored introduction",
        "sections": [{"heading": "Why", "content": "The **moon** pulls.", "links": []}],
        "sources": [{"name": "NOAA"}],
        "reference_url": "https://noaa.gov",
        "summary": "Why the sea rises and falls."
    }"#;

    let article = parse_article(raw)?;
    assert_eq!(article.sections[0].body, "The **moon** pulls.");
    assert!(article.sections[0].subpoints.is_empty());
    assert_eq!(article.sources[0].title, "NOAA");
    assert_eq!(article.sources[0].url, "");
    assert_eq!(article.reference_url.as_deref(), Some("https://noaa.gov"));
    assert_eq!(article.summary, "Why the sea rises and falls.");
    Ok(())
}

#[test]
fn test_never_fabricates_an_article() {
    let err = parse_article("I'm sorry, I can't write about that topic.").unwrap_err();
    match err.kind() {
        ArticulateErrorKind::ParseFailure(e) => assert_eq!(e.kind, ParseErrorKind::NoObjectFound),
        other => panic!("expected parse failure, got {other:?}"),
    }
}

#[test]
fn test_blank_title_fails_validation() {
    let err = parse_article(r#"{"title": " ", "sections": [{"heading": "H", "body": "b"}]}"#)
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        ArticulateErrorKind::ValidationFailure(_)
    ));
}
