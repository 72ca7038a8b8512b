//! Layered configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (include_str! from articulate.toml)
//! 2. `~/.config/articulate/articulate.toml`
//! 3. `./articulate.toml`
//! 4. Environment variables prefixed `ARTICULATE__`, e.g.
//!    `ARTICULATE__SERVICE__GROUNDING=true`
//!
//! A file passed explicitly replaces sources 2 and 3.

use articulate_error::{ArticulateError, ArticulateResult, ConfigError};
use articulate_models::ServiceConfig;
use articulate_pipeline::PipelineConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../articulate.toml");

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings for the `[logging]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable logs
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Top-level Articulate configuration.
///
/// # Example
///
/// ```no_run
/// use articulate::ArticulateConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ArticulateConfig::load()?;
/// println!("model: {}", config.service.model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArticulateConfig {
    /// Generative service settings
    #[serde(default)]
    pub service: ServiceConfig,
    /// Pipeline deadlines, retries and SEO behaviour
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArticulateConfig {
    /// Load with the full precedence chain.
    ///
    /// Missing user files are skipped silently.
    ///
    /// # Errors
    ///
    /// Returns an error if any present source cannot be parsed.
    #[instrument]
    pub fn load() -> ArticulateResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/articulate/articulate.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }
        builder = builder.add_source(File::with_name("articulate").required(false));

        Self::finish(Self::with_env(builder))
    }

    /// Load bundled defaults, then `path`, then environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ArticulateResult<Self> {
        debug!("Loading configuration from file");
        let builder = Self::defaults().add_source(File::from(path.as_ref()).required(true));
        Self::finish(Self::with_env(builder))
    }

    /// Load bundled defaults overlaid with a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid configuration.
    pub fn from_toml_str(toml: &str) -> ArticulateResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn with_env(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix("ARTICULATE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> ArticulateResult<Self> {
        builder
            .build()
            .map_err(|e| {
                ArticulateError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ArticulateError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
