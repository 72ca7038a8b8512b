//! Deterministic HTML assembly.
//!
//! [`render_html`] is a pure function of its inputs: no timestamps, no
//! randomness, no environment lookups. Text is escaped before the
//! markdown-lite transform runs, so only the markup produced here reaches
//! the document.
//!
//! Markdown-lite supports exactly three constructs:
//! - `**text**` becomes `<strong>text</strong>`
//! - lines starting with `*`, `-` or `+` and whitespace become list items
//! - runs of other non-blank lines become one paragraph
//!
//! Anything else, including single-asterisk emphasis, passes through as
//! literal text.

use crate::text::bullet_item;
use articulate_core::{Article, SeoMetadata, Source, Validate};
use articulate_error::RenderError;
use std::fmt::Write;
use tracing::{debug, instrument};

const STYLESHEET: &str = "body{font-family:Georgia,'Times New Roman',serif;line-height:1.65;color:#1f2328;background:#fdfdfb;margin:0;padding:0}
article{max-width:760px;margin:0 auto;padding:2.5rem 1.25rem}
h1{font-size:2.2rem;line-height:1.2;margin:0 0 1.5rem}
h2{font-size:1.45rem;margin:2rem 0 .75rem;border-bottom:1px solid #e4e4e0;padding-bottom:.3rem}
p{margin:0 0 1rem}
ul{margin:0 0 1rem;padding-left:1.5rem}
li{margin:.25rem 0}
div.summary{font-size:1.1rem;color:#3d4752;border-left:4px solid #0b5cad;padding:.25rem 0 .25rem 1rem;margin:0 0 2rem}
ul.subpoints{border-left:3px solid #c9d6e3;padding-left:1.75rem;color:#3d4752}
strong{color:#0f1419}
a{color:#0b5cad;text-decoration:none}
a:hover{text-decoration:underline}
footer{margin-top:3rem;padding-top:1rem;border-top:2px solid #e4e4e0;font-size:.95rem}
footer li p{margin:.2rem 0 0;color:#57606a}";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Turn matched `**` pairs into `<strong>` markup.
///
/// An unmatched trailing `**` is left as literal text.
fn emphasize(escaped: &str) -> String {
    let parts: Vec<&str> = escaped.split("**").collect();
    let markers = parts.len() - 1;
    let paired = markers - markers % 2;

    let mut out = String::with_capacity(escaped.len() + paired * 8);
    for (i, part) in parts.iter().enumerate() {
        out.push_str(part);
        if i < markers {
            if i >= paired {
                out.push_str("**");
            } else if i % 2 == 0 {
                out.push_str("<strong>");
            } else {
                out.push_str("</strong>");
            }
        }
    }
    out
}

/// Escape and emphasize one line of inline text.
fn inline(text: &str) -> String {
    emphasize(&escape_html(text.trim()))
}

/// Render a markdown-lite block into paragraphs and lists.
pub fn markdown_lite(text: &str) -> String {
    enum Block {
        Paragraph(Vec<String>),
        List(Vec<String>),
    }

    let mut blocks: Vec<Block> = Vec::new();
    let mut current: Option<Block> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            blocks.extend(current.take());
            continue;
        }

        if let Some(item) = bullet_item(line) {
            if let Some(Block::List(items)) = current.as_mut() {
                items.push(inline(item));
                continue;
            }
            blocks.extend(current.take());
            current = Some(Block::List(vec![inline(item)]));
        } else {
            if let Some(Block::Paragraph(lines)) = current.as_mut() {
                lines.push(inline(line));
                continue;
            }
            blocks.extend(current.take());
            current = Some(Block::Paragraph(vec![inline(line)]));
        }
    }
    blocks.extend(current);

    blocks
        .into_iter()
        .map(|block| match block {
            Block::Paragraph(lines) => format!("<p>{}</p>", lines.join(" ")),
            Block::List(items) => {
                let items: String = items
                    .into_iter()
                    .map(|item| format!("<li>{}</li>", item))
                    .collect();
                format!("<ul>{}</ul>", items)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix scheme-less URLs with `https://`.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        url.to_string()
    } else if let Some(rest) = url.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        format!("https://{}", url)
    }
}

fn meta_name(out: &mut String, name: &str, content: &str) {
    let _ = writeln!(
        out,
        "<meta name=\"{}\" content=\"{}\">",
        name,
        escape_html(content)
    );
}

fn meta_property(out: &mut String, property: &str, content: &str) {
    let _ = writeln!(
        out,
        "<meta property=\"{}\" content=\"{}\">",
        property,
        escape_html(content)
    );
}

fn render_head(out: &mut String, article: &Article, seo: &SeoMetadata) {
    out.push_str("<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(&seo.title));
    meta_name(out, "description", &seo.description);
    if !seo.keywords.is_empty() {
        meta_name(out, "keywords", &seo.keywords.join(", "));
    }

    meta_property(out, "og:title", &seo.open_graph.title);
    meta_property(out, "og:description", &seo.open_graph.description);
    meta_property(out, "og:type", &seo.open_graph.kind);

    meta_name(out, "twitter:card", &seo.twitter_card.card_type);
    meta_name(out, "twitter:title", &seo.twitter_card.title);
    meta_name(out, "twitter:description", &seo.twitter_card.description);

    if let Some(url) = article
        .reference_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
    {
        let url = normalize_url(url);
        meta_property(out, "og:url", &url);
        let _ = writeln!(out, "<link rel=\"canonical\" href=\"{}\">", escape_html(&url));
    }

    let _ = writeln!(out, "<style>\n{}\n</style>", STYLESHEET);
    out.push_str("</head>\n");
}

fn render_source(out: &mut String, source: &Source) {
    let title = if source.title.trim().is_empty() {
        source.url.trim()
    } else {
        source.title.trim()
    };

    out.push_str("<li>");
    if source.url.trim().is_empty() {
        let _ = write!(out, "<cite>{}</cite>", escape_html(title));
    } else {
        let _ = write!(
            out,
            "<a href=\"{}\" rel=\"noopener\">{}</a>",
            escape_html(&normalize_url(&source.url)),
            escape_html(title)
        );
    }
    if !source.description.trim().is_empty() {
        let _ = write!(out, "<p>{}</p>", inline(&source.description));
    }
    out.push_str("</li>\n");
}

/// Render a complete, self-contained HTML document.
///
/// # Errors
///
/// Returns an error if the article has no title or no sections.
///
/// # Examples
///
/// ```
/// use articulate_core::{Article, Section};
/// use articulate_pipeline::{fallback_metadata, render_html};
///
/// let article = Article {
///     title: "Tides".to_string(),
///     summary: String::new(),
///     sections: vec![Section::new("Why", "The **moon** pulls.")],
///     sources: vec![],
///     query: "tides".to_string(),
///     reference_url: None,
/// };
/// let seo = fallback_metadata(&article, 8);
/// let html = render_html(&article, &seo).unwrap();
/// assert!(html.contains("<strong>moon</strong>"));
/// ```
#[instrument(skip_all, fields(title = %article.title, sections = article.sections.len()))]
pub fn render_html(article: &Article, seo: &SeoMetadata) -> Result<String, RenderError> {
    article
        .validate()
        .map_err(|e| RenderError::new(format!("Cannot render article: {}", e.kind())))?;

    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n");
    render_head(&mut out, article, seo);

    out.push_str("<body>\n<article>\n");
    let _ = writeln!(out, "<h1>{}</h1>", inline(&article.title));

    let summary = markdown_lite(&article.summary);
    if !summary.is_empty() {
        let _ = writeln!(out, "<div class=\"summary\">\n{}\n</div>", summary);
    }

    for section in &article.sections {
        out.push_str("<section>\n");
        let _ = writeln!(out, "<h2>{}</h2>", inline(&section.heading));
        let body = markdown_lite(&section.body);
        if !body.is_empty() {
            out.push_str(&body);
            out.push('\n');
        }

        let subpoints: Vec<String> = section
            .subpoints
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("<li>{}</li>", inline(bullet_item(s).unwrap_or(s))))
            .collect();
        if !subpoints.is_empty() {
            let _ = writeln!(out, "<ul class=\"subpoints\">{}</ul>", subpoints.concat());
        }
        out.push_str("</section>\n");
    }

    if !article.sources.is_empty() {
        out.push_str("<footer class=\"sources\">\n<h2>Sources</h2>\n<ol>\n");
        for source in &article.sources {
            render_source(&mut out, source);
        }
        out.push_str("</ol>\n</footer>\n");
    }

    out.push_str("</article>\n</body>\n</html>\n");
    debug!(html_len = out.len(), "Rendered article");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_single_asterisks() {
        assert_eq!(
            markdown_lite("**bold** and *not bold*"),
            "<p><strong>bold</strong> and *not bold*</p>"
        );
    }

    #[test]
    fn test_unmatched_marker_stays_literal() {
        assert_eq!(emphasize("a **b** c **d"), "a <strong>b</strong> c **d");
    }

    #[test]
    fn test_list_and_paragraph_blocks() {
        let body = "Intro line one\nline two\n* first\n- second\n\nAfter list";
        assert_eq!(
            markdown_lite(body),
            "<p>Intro line one line two</p>\n<ul><li>first</li><li>second</li></ul>\n<p>After list</p>"
        );
    }

    #[test]
    fn test_blank_line_splits_paragraphs() {
        assert_eq!(markdown_lite("one\n\ntwo"), "<p>one</p>\n<p>two</p>");
    }

    #[test]
    fn test_escaping_runs_before_markup() {
        assert_eq!(
            markdown_lite("<script>**x**</script>"),
            "<p>&lt;script&gt;<strong>x</strong>&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_unsupported_syntax_passes_through() {
        assert_eq!(
            markdown_lite("# Heading and [link](x) and `code`"),
            "<p># Heading and [link](x) and `code`</p>"
        );
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com/a"), "https://example.com/a");
        assert_eq!(normalize_url("//cdn.example.com"), "https://cdn.example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url(" HTTPS://Example.com "), "HTTPS://Example.com");
    }
}
