//! The public generate/regenerate surface.

use crate::{Orchestrator, PipelineConfig, PromptStrategy, SeoGenerator, render_html};
use articulate_core::{Article, ArticleBundle};
use articulate_error::ArticulateResult;
use articulate_interface::GenerativeService;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, instrument};

/// Turns queries and instructions into article, metadata and HTML.
///
/// Cloning is cheap and every request is independent, so one pipeline can
/// serve many concurrent tasks.
///
/// # Examples
///
/// ```no_run
/// use articulate_interface::GenerativeService;
/// use articulate_pipeline::{Pipeline, PipelineConfig};
/// use std::sync::Arc;
///
/// # async fn example(service: Arc<dyn GenerativeService>) -> Result<(), Box<dyn std::error::Error>> {
/// let pipeline = Pipeline::new(service, PipelineConfig::default());
/// let bundle = pipeline.generate("Paris Olympics 2024", None).await?;
/// let revised = pipeline
///     .regenerate(&bundle.article, "Make this more appealing to Gen Z")
///     .await?;
/// println!("{}", revised.html);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    orchestrator: Orchestrator,
    seo: SeoGenerator,
    seo_via_service: bool,
    keyword_limit: usize,
}

impl Pipeline {
    /// Create a pipeline around a generative service.
    pub fn new(service: Arc<dyn GenerativeService>, config: PipelineConfig) -> Self {
        let orchestrator = Orchestrator::new(service, &config);
        let mut pipeline = Self {
            seo: SeoGenerator::offline(config.keyword_limit),
            orchestrator,
            seo_via_service: config.seo_via_service,
            keyword_limit: config.keyword_limit,
        };
        pipeline.rebuild_seo();
        pipeline
    }

    /// Request web-search grounding for article generation.
    pub fn with_grounding(mut self, enabled: bool) -> Self {
        self.orchestrator = self.orchestrator.with_grounding(enabled);
        self.rebuild_seo();
        self
    }

    /// Pin the date used in prompts.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.orchestrator = self.orchestrator.with_today(today);
        self.rebuild_seo();
        self
    }

    fn rebuild_seo(&mut self) {
        self.seo = if self.seo_via_service {
            // SEO calls never need search grounding.
            SeoGenerator::new(
                self.orchestrator.clone().with_grounding(false),
                self.keyword_limit,
            )
        } else {
            SeoGenerator::offline(self.keyword_limit)
        };
    }

    /// Generate a fresh article about `query`.
    ///
    /// A blank `reference_url` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` for an empty query, and otherwise any
    /// service, timeout, parse, validation or render failure.
    #[instrument(skip(self), fields(query_len = query.len()))]
    pub async fn generate(
        &self,
        query: &str,
        reference_url: Option<&str>,
    ) -> ArticulateResult<ArticleBundle> {
        let reference_url = reference_url.map(str::trim).filter(|u| !u.is_empty());
        let article = self
            .orchestrator
            .run(PromptStrategy::Fresh {
                query,
                reference_url,
            })
            .await?;
        self.bundle(article).await
    }

    /// Produce a modified copy of `article` following `instruction`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` for an empty instruction or an unrequested
    /// change in section count, and otherwise any service, timeout, parse,
    /// validation or render failure.
    #[instrument(skip(self, article), fields(title = %article.title, sections = article.sections.len()))]
    pub async fn regenerate(
        &self,
        article: &Article,
        instruction: &str,
    ) -> ArticulateResult<ArticleBundle> {
        let article = self
            .orchestrator
            .run(PromptStrategy::Modify {
                article,
                instruction,
            })
            .await?;
        self.bundle(article).await
    }

    async fn bundle(&self, article: Article) -> ArticulateResult<ArticleBundle> {
        let seo_metadata = self.seo.generate(&article).await;
        let html = render_html(&article, &seo_metadata)?;
        info!(html_len = html.len(), "Bundle assembled");
        Ok(ArticleBundle {
            article,
            seo_metadata,
            html,
        })
    }
}
