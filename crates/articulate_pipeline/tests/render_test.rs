//! Properties of the rendered HTML document.

mod test_utils;

use articulate_core::{Article, Section, SeoMetadata, Source};
use articulate_pipeline::{fallback_metadata, render_html};
use test_utils::sample_article;

fn seo_for(article: &Article) -> SeoMetadata {
    fallback_metadata(article, 8)
}

#[test]
fn test_rendering_is_byte_identical() -> anyhow::Result<()> {
    let article = sample_article();
    let seo = seo_for(&article);
    let first = render_html(&article, &seo)?;
    let second = render_html(&article.clone(), &seo.clone())?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_no_sources_block_without_sources() -> anyhow::Result<()> {
    let mut article = sample_article();
    article.sources.clear();
    let html = render_html(&article, &seo_for(&article))?;
    assert!(!html.contains("class=\"sources\""));
    assert!(!html.contains("<h2>Sources</h2>"));
    Ok(())
}

#[test]
fn test_sources_block_lists_each_source() -> anyhow::Result<()> {
    let mut article = sample_article();
    article.sources.push(Source {
        title: "L'Équipe".to_string(),
        url: "lequipe.fr/jo".to_string(),
        description: "Daily **coverage**".to_string(),
    });
    article.sources.push(Source {
        title: "Team handbook".to_string(),
        url: String::new(),
        description: String::new(),
    });

    let html = render_html(&article, &seo_for(&article))?;
    assert!(html.contains("<footer class=\"sources\">"));
    assert!(html.contains(
        "<a href=\"https://olympics.com/paris-2024\" rel=\"noopener\">Olympics.com</a><p>Official results</p>"
    ));
    assert!(html.contains("<a href=\"https://lequipe.fr/jo\" rel=\"noopener\">L&#39;Équipe</a>"));
    assert!(html.contains("<p>Daily <strong>coverage</strong></p>"));
    assert!(html.contains("<li><cite>Team handbook</cite></li>"));
    Ok(())
}

#[test]
fn test_summary_renders_above_sections() -> anyhow::Result<()> {
    let mut article = sample_article();
    article.summary = "Sixteen days of **records** on the Seine.".to_string();
    let html = render_html(&article, &seo_for(&article))?;

    let summary = html
        .find("<div class=\"summary\">\n<p>Sixteen days of <strong>records</strong> on the Seine.</p>\n</div>")
        .unwrap();
    let title = html.find("<h1>").unwrap();
    let first_section = html.find("<section>").unwrap();
    assert!(title < summary && summary < first_section);
    Ok(())
}

#[test]
fn test_no_summary_block_without_summary() -> anyhow::Result<()> {
    let article = sample_article();
    let html = render_html(&article, &seo_for(&article))?;
    assert!(!html.contains("<div class=\"summary\">"));
    Ok(())
}

#[test]
fn test_markdown_lite_in_sections() -> anyhow::Result<()> {
    let article = Article {
        title: "Markup".to_string(),
        summary: String::new(),
        sections: vec![
            Section::new("Inline", "**bold** and *not bold*"),
            Section::new("List", "Intro\n* one\n* **two**")
                .with_subpoints(vec!["* takeaway".to_string(), "plain".to_string()]),
        ],
        sources: Vec::new(),
        query: String::new(),
        reference_url: None,
    };

    let html = render_html(&article, &seo_for(&article))?;
    assert!(html.contains("<p><strong>bold</strong> and *not bold*</p>"));
    assert!(html.contains("<p>Intro</p>\n<ul><li>one</li><li><strong>two</strong></li></ul>"));
    assert!(html.contains("<ul class=\"subpoints\"><li>takeaway</li><li>plain</li></ul>"));
    Ok(())
}

#[test]
fn test_head_carries_metadata() -> anyhow::Result<()> {
    let mut article = sample_article();
    article.reference_url = Some("olympics.com/paris".to_string());
    let mut seo = seo_for(&article);
    seo.description = "Games \"on\" the <Seine>".to_string();
    seo.keywords = vec!["Paris".to_string(), "Olympics".to_string()];

    let html = render_html(&article, &seo)?;
    assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n<head>"));
    assert!(html.contains("<title>Paris Olympics 2024</title>"));
    assert!(html.contains(
        "<meta name=\"description\" content=\"Games &quot;on&quot; the &lt;Seine&gt;\">"
    ));
    assert!(html.contains("<meta name=\"keywords\" content=\"Paris, Olympics\">"));
    assert!(html.contains("<meta property=\"og:type\" content=\"article\">"));
    assert!(html.contains("<meta name=\"twitter:card\" content=\"summary_large_image\">"));
    assert!(html.contains("<link rel=\"canonical\" href=\"https://olympics.com/paris\">"));
    assert!(html.contains("<style>"));
    Ok(())
}

#[test]
fn test_sections_render_in_order() -> anyhow::Result<()> {
    let article = sample_article();
    let html = render_html(&article, &seo_for(&article))?;
    let positions: Vec<usize> = article
        .headings()
        .iter()
        .map(|h| html.find(&format!("<h2>{}</h2>", h)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    Ok(())
}

#[test]
fn test_invalid_article_is_a_render_failure() {
    let mut article = sample_article();
    article.sections.clear();
    let seo = seo_for(&article);
    assert!(render_html(&article, &seo).is_err());
}
