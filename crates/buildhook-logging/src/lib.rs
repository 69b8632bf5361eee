//! Log configuration.
//!
//! Logs always go to stderr: `sync` and `extract` print their results on
//! stdout.

use std::str::FromStr;

use buildhook_config::Config;
use thiserror::Error;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tracing_tree::HierarchicalLayer;

const DEFAULT_ENV_CONFIG: &str = "info,actix_server=warn,buildhook=debug";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(
        "Could not set tracing global default subscriber,\n  caused by: {}",
        source
    )]
    TracingSetGlobalDefaultError {
        source: tracing::dispatcher::SetGlobalDefaultError,
    },
    #[error("Could not initialize tracing log tracer,\n  caused by: {}", source)]
    TracingLogTracerError {
        source: tracing::log::SetLoggerError,
    },
    #[error(
        "Wrong env filter configuration: {}\n  caused by: {}",
        configuration,
        source
    )]
    EnvFilterConfigurationError {
        source: tracing_subscriber::filter::ParseError,
        configuration: String,
    },
}

/// Build the level filter, `RUST_LOG` taking precedence over the default.
fn build_env_filter(rust_log: Option<String>) -> Result<EnvFilter, LoggingError> {
    let configuration = rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENV_CONFIG.to_string());

    EnvFilter::from_str(&configuration).map_err(|e| LoggingError::EnvFilterConfigurationError {
        source: e,
        configuration,
    })
}

/// Configure logging.
///
/// Human-readable tree output by default, bunyan JSON lines when
/// `BUILDHOOK_LOGGING_USE_BUNYAN` is set.
pub fn configure_logging(config: &Config) -> Result<(), LoggingError> {
    LogTracer::init().map_err(|e| LoggingError::TracingLogTracerError { source: e })?;

    let filter_layer = build_env_filter(std::env::var("RUST_LOG").ok())?;
    let use_bunyan = config.logging.use_bunyan;
    let app_name = format!("{}-{}", env!("CARGO_PKG_NAME"), config.version);

    let hierarchical_layer = (!use_bunyan).then(|| {
        HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_bracketed_fields(true)
    });
    let json_storage_layer = use_bunyan.then_some(JsonStorageLayer);
    let bunyan_layer =
        use_bunyan.then(|| BunyanFormattingLayer::new(app_name, std::io::stderr));

    let subscriber = tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(filter_layer)
        .with(hierarchical_layer)
        .with(json_storage_layer)
        .with(bunyan_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::TracingSetGlobalDefaultError { source: e })?;

    Ok(())
}
