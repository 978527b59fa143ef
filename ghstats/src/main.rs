//! ghstats - Desktop viewer for GitHub repository traffic charts.
//!
//! Loads chart definitions from a JSON5 configuration file and fetches
//! traffic data from the ghstats server (or the built-in demo source).

use std::path::PathBuf;

use clap::Parser;
use iced::application;

use ghstats::app::parse_base_url;
use ghstats::{DataSource, GhStats};
use ghstats_common::{ViewerConfig, init_tracing};

/// Desktop viewer for GitHub repository traffic charts.
#[derive(Parser, Debug)]
#[command(name = "ghstats")]
#[command(about = "View GitHub repository traffic charts")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server base URL (overrides config).
    #[arg(long)]
    server: Option<String>,

    /// Serve chart data from the built-in demo source.
    #[arg(long)]
    demo: bool,

    /// Log level (trace, debug, info, warn, error). Overrides config.
    #[arg(long)]
    log_level: Option<String>,
}

/// Configuration file used when `--config` is not given.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ghstats").join("viewer.json5"))
}

fn load_config(args: &Args) -> anyhow::Result<ViewerConfig> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => match default_config_path().filter(|path| path.exists()) {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        },
    };

    if let Some(server) = &args.server {
        config.server.base_url = server.clone();
    }
    if args.demo {
        config.demo = true;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_tracing(&config.logging)?;

    let base_url = parse_base_url(&config.server)?;
    let source = DataSource::from_config(&config)?;
    let charts = config.charts.clone();

    tracing::info!(
        charts = charts.len(),
        demo = config.demo,
        server = %base_url,
        "Loaded configuration"
    );

    application(
        move || GhStats::new(base_url.clone(), &charts, source.clone()).boot(),
        GhStats::update,
        GhStats::view,
    )
    .title(GhStats::title)
    .theme(GhStats::theme)
    .run()
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
