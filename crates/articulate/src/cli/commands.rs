//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Articulate - structured articles, SEO metadata and HTML from a topic query
#[derive(Parser, Debug)]
#[command(name = "articulate")]
#[command(about = "Generate structured articles, SEO metadata and HTML from a topic query", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the user and local files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new article about a topic
    Generate {
        /// Topic to write about
        #[arg(long)]
        query: String,

        /// Reference URL to use as primary context
        #[arg(long)]
        url: Option<String>,

        /// Directory for article.json, seo.json and article.html
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Enable web-search grounding for this run
        #[arg(long)]
        grounding: bool,
    },

    /// Modify an existing article following an instruction
    Regenerate {
        /// Path to a previously generated article.json
        #[arg(long)]
        article: PathBuf,

        /// What to change, e.g. "Make this more appealing to Gen Z"
        #[arg(long)]
        instruction: String,

        /// Directory for article.json, seo.json and article.html
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Render HTML for an existing article without calling the service
    Render {
        /// Path to an article.json
        #[arg(long)]
        article: PathBuf,

        /// Path to a seo.json; derived locally when absent
        #[arg(long)]
        seo: Option<PathBuf>,

        /// Directory for article.json, seo.json and article.html
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}
