//! Articulate CLI binary.
//!
//! This binary provides command-line access to Articulate's functionality:
//! - Generate an article, SEO metadata and HTML from a topic query
//! - Regenerate an existing article from an instruction
//! - Render HTML for an existing article offline

use articulate::{ArticulateConfig, ObservabilityConfig, init_observability};
use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, Commands, generate, regenerate, render};

    // GEMINI_API_KEY may live in a .env file
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => ArticulateConfig::from_file(path),
        None => ArticulateConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let observability = ObservabilityConfig::default()
        .with_log_level(log_level)
        .with_json_logs(config.logging.json);
    if let Err(e) = init_observability(&observability) {
        eprintln!("Could not initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    // Execute the requested command
    let result = match cli.command {
        Commands::Generate {
            query,
            url,
            out,
            grounding,
        } => generate(&config, &query, url.as_deref(), &out, grounding).await,
        Commands::Regenerate {
            article,
            instruction,
            out,
        } => regenerate(&config, &article, &instruction, &out).await,
        Commands::Render { article, seo, out } => render(&config, &article, seo.as_deref(), &out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(category = e.category(), error = %e, "Command failed");
            eprintln!("Article generation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
