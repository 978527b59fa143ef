//! ghstats Common Library
//!
//! This crate provides shared types and utilities for the ghstats traffic viewer:
//!
//! - [`payload`] - Chart data model (`ChartPayload`, `Dataset`, `SeriesId`)
//! - [`datetime`] - Timestamp parsing and formatting
//! - [`metric`] - Traffic metrics selectable per chart
//! - [`colors`] - Series color palette
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod colors;
pub mod config;
pub mod datetime;
pub mod error;
pub mod metric;
pub mod payload;

// Re-export commonly used types at the crate root
pub use colors::ColorCycle;
pub use config::{
    ChartConfig, LogFormat, LoggingConfig, ServerConfig, ViewerConfig, load_config, parse_config,
};
pub use datetime::{DT_FMT, Timestamp, dt_to_str, parse_dt, parse_query_dt};
pub use error::{Error, Result};
pub use metric::Metric;
pub use payload::{ChartData, ChartPayload, DataPoint, Dataset, SeriesId};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
