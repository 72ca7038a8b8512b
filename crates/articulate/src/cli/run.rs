//! Command handlers.

use articulate::{
    ArticleBundle, ArticulateConfig, ArticulateResult, WrittenBundle, pipeline_from_config,
    read_article, read_seo, render_offline, write_bundle,
};
use std::path::Path;
use tracing::{info, instrument};

fn report(bundle: &ArticleBundle, written: &WrittenBundle) {
    println!("{}", bundle.article.title);
    println!("  sections: {}", bundle.article.sections.len());
    println!("  sources:  {}", bundle.article.sources.len());
    println!("  article:  {}", written.article.display());
    println!("  seo:      {}", written.seo.display());
    println!("  html:     {}", written.html.display());
}

/// Generate a fresh article and write the bundle to `out`.
#[instrument(skip(config))]
pub async fn generate(
    config: &ArticulateConfig,
    query: &str,
    url: Option<&str>,
    out: &Path,
    grounding: bool,
) -> ArticulateResult<()> {
    let pipeline = pipeline_from_config(config, grounding)?;
    let bundle = pipeline.generate(query, url).await?;
    let written = write_bundle(&bundle, out)?;
    info!(title = %bundle.article.title, "Article generated");
    report(&bundle, &written);
    Ok(())
}

/// Regenerate the article at `article_path` and write the bundle to `out`.
#[instrument(skip(config))]
pub async fn regenerate(
    config: &ArticulateConfig,
    article_path: &Path,
    instruction: &str,
    out: &Path,
) -> ArticulateResult<()> {
    let article = read_article(article_path)?;
    let pipeline = pipeline_from_config(config, false)?;
    let bundle = pipeline.regenerate(&article, instruction).await?;
    let written = write_bundle(&bundle, out)?;
    info!(title = %bundle.article.title, "Article regenerated");
    report(&bundle, &written);
    Ok(())
}

/// Render an existing article offline and write the bundle to `out`.
#[instrument(skip(config))]
pub fn render(
    config: &ArticulateConfig,
    article_path: &Path,
    seo_path: Option<&Path>,
    out: &Path,
) -> ArticulateResult<()> {
    let article = read_article(article_path)?;
    let seo = seo_path.map(read_seo).transpose()?;
    let bundle = render_offline(article, seo, config.pipeline.keyword_limit)?;
    let written = write_bundle(&bundle, out)?;
    info!(title = %bundle.article.title, "Article rendered");
    report(&bundle, &written);
    Ok(())
}
