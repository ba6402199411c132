//! Structured logging setup

use crate::config::LoggingConfig;
use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter directive for this crate and its HTTP stack.
/// `RUST_LOG` takes precedence when set.
fn filter_directive(config: &LoggingConfig) -> String {
    let level = config.level.to_lowercase();
    format!("{level},todo_api={level},tower_http={level},sqlx=warn")
}

/// Initialize the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(config)))?;

    match config.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).json())
            .try_init()?,
        "pretty" => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).pretty())
            .try_init()?,
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).compact())
            .try_init()?,
    }

    tracing::info!(
        target: "todo_api::logging",
        level = %config.level,
        format = %config.format,
        "Structured logging initialized"
    );

    Ok(())
}
