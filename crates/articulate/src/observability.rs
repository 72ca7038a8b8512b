//! Tracing subscriber setup.
//!
//! `RUST_LOG` always wins over the configured level. With the
//! `observability` feature, spans are also exported to stdout through
//! OpenTelemetry.

use articulate_error::{ArticulateResult, ConfigError};
use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for log output.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name for telemetry attribution
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log level filter (e.g., "info", "debug")
    pub log_level: String,
    /// Enable JSON-formatted logs for structured logging
    pub json_logs: bool,
}

impl ObservabilityConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    fn env_filter(&self) -> ArticulateResult<EnvFilter> {
        if let Ok(directives) = env::var("RUST_LOG") {
            if let Ok(filter) = EnvFilter::try_new(&directives) {
                return Ok(filter);
            }
        }
        EnvFilter::try_new(&self.log_level).map_err(|e| {
            ConfigError::new(format!("Invalid log level '{}': {}", self.log_level, e)).into()
        })
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// # Errors
///
/// Returns an error if the log level is not a valid filter or a subscriber
/// is already installed.
pub fn init_observability(config: &ObservabilityConfig) -> ArticulateResult<()> {
    let env_filter = config.env_filter()?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    #[cfg(feature = "observability")]
    let registry = registry.with(otel::layer(config));

    registry.try_init().map_err(|e| {
        ConfigError::new(format!("Failed to install tracing subscriber: {}", e)).into()
    })
}

#[cfg(feature = "observability")]
mod otel {
    use super::ObservabilityConfig;
    use opentelemetry::{KeyValue, global, trace::TracerProvider};
    use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
    use opentelemetry_stdout::SpanExporter;
    use tracing_subscriber::registry::LookupSpan;

    /// Tracing layer bridging spans to an OpenTelemetry stdout exporter.
    pub(super) fn layer<S>(config: &ObservabilityConfig) -> impl tracing_subscriber::Layer<S>
    where
        S: tracing::Subscriber + for<'span> LookupSpan<'span>,
    {
        let resource = Resource::builder()
            .with_service_name(config.service_name.clone())
            .with_attributes(vec![KeyValue::new(
                "service.version",
                config.service_version.clone(),
            )])
            .build();

        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(SpanExporter::default())
            .with_resource(resource)
            .build();
        global::set_tracer_provider(provider.clone());

        let tracer = provider.tracer(config.service_name.clone());
        tracing_opentelemetry::layer().with_tracer(tracer)
    }
}
