//! Reading caller-supplied artifacts and writing bundles to disk.

use articulate_core::{Article, ArticleBundle, SeoMetadata, Validate};
use articulate_error::{ArticulateResult, IoError, JsonError};
use articulate_pipeline::{fallback_metadata, normalize_metadata, render_html};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// File name of the serialized article.
pub const ARTICLE_FILE: &str = "article.json";
/// File name of the serialized SEO metadata.
pub const SEO_FILE: &str = "seo.json";
/// File name of the rendered document.
pub const HTML_FILE: &str = "article.html";

/// Where each artifact of a bundle was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenBundle {
    /// Path of `article.json`
    pub article: PathBuf,
    /// Path of `seo.json`
    pub seo: PathBuf,
    /// Path of `article.html`
    pub html: PathBuf,
}

fn read_json<T: DeserializeOwned + Validate>(path: &Path) -> ArticulateResult<T> {
    let text = fs::read_to_string(path)
        .map_err(|e| IoError::new(format!("Failed to read {}: {}", path.display(), e)))?;
    let value: T = serde_json::from_str(&text)
        .map_err(|e| JsonError::new(format!("Failed to parse {}: {}", path.display(), e)))?;
    value.validate()?;
    Ok(value)
}

/// Read and validate an article previously written by this tool.
///
/// # Errors
///
/// Returns an error if the file is unreadable, not an article, or violates
/// the article invariants.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn read_article(path: &Path) -> ArticulateResult<Article> {
    read_json(path)
}

/// Read and validate SEO metadata.
///
/// # Errors
///
/// Returns an error if the file is unreadable, not SEO metadata, or has an
/// empty title or description.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn read_seo(path: &Path) -> ArticulateResult<SeoMetadata> {
    read_json(path)
}

/// Assemble a bundle without calling any service.
///
/// Supplied metadata is normalized; otherwise it is derived locally.
///
/// # Errors
///
/// Returns `RenderFailure` if the article cannot be rendered.
pub fn render_offline(
    article: Article,
    seo: Option<SeoMetadata>,
    keyword_limit: usize,
) -> ArticulateResult<ArticleBundle> {
    let seo_metadata = match seo {
        Some(seo) => normalize_metadata(seo, &article, keyword_limit),
        None => fallback_metadata(&article, keyword_limit),
    };
    let html = render_html(&article, &seo_metadata)?;
    Ok(ArticleBundle {
        article,
        seo_metadata,
        html,
    })
}

fn to_pretty_json<T: Serialize>(value: &T) -> ArticulateResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new(format!("Failed to serialize output: {}", e)).into())
}

fn write_file(path: &Path, contents: &str) -> ArticulateResult<()> {
    fs::write(path, contents)
        .map_err(|e| IoError::new(format!("Failed to write {}: {}", path.display(), e)).into())
}

/// Write `article.json`, `seo.json` and `article.html` into `dir`.
///
/// The directory is created if needed and existing files are replaced.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be written.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn write_bundle(bundle: &ArticleBundle, dir: &Path) -> ArticulateResult<WrittenBundle> {
    fs::create_dir_all(dir)
        .map_err(|e| IoError::new(format!("Failed to create {}: {}", dir.display(), e)))?;

    let written = WrittenBundle {
        article: dir.join(ARTICLE_FILE),
        seo: dir.join(SEO_FILE),
        html: dir.join(HTML_FILE),
    };

    write_file(&written.article, &to_pretty_json(&bundle.article)?)?;
    write_file(&written.seo, &to_pretty_json(&bundle.seo_metadata)?)?;
    write_file(&written.html, &bundle.html)?;

    debug!("Bundle written");
    Ok(written)
}
