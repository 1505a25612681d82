use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spindle_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "spindle")]
#[command(author, version, about = "A terminal image carousel")]
struct Cli {
    /// Directory of images to show. A `full/` subdirectory with matching
    /// filenames provides full-size variants for the fullscreen viewer.
    images_dir: PathBuf,

    /// Config file path (default: ~/.config/spindle/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the autoplay interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Override the preferred visible item count (must be odd)
    #[arg(long)]
    visible: Option<u32>,

    /// Start with autoplay paused
    #[arg(long)]
    paused: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(ms) = cli.interval_ms {
        config.carousel.autoplay_interval_ms = ms;
    }
    if let Some(visible) = cli.visible {
        config.carousel.preferred_visible_count = visible;
    }
    if cli.paused {
        config.carousel.autoplay_on_start = false;
    }
    // CLI overrides go through the same validation as the file
    config.validate()?;

    init_logging(&config)?;

    commands::run::run(Arc::new(config), cli.images_dir).await
}

/// Log to a file; the TUI owns the terminal
fn init_logging(config: &AppConfig) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spindle");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let log_file = std::fs::File::create(log_dir.join("spindle.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.ui.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();

    Ok(())
}
