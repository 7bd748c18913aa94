//! osm-style 命令行入口

use anyhow::Result;
use clap::Parser;
use osm_style_shared::{config::AppConfig, observability};
use osm_styler::cli::{self, Cli};
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load("osm-styler").unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }

    observability::init(&config.observability)?;
    info!(
        environment = %config.environment,
        polygons = %cli.polygons.display(),
        lines = %cli.lines.display(),
        "Starting osm-style"
    );

    let report = cli::run(&cli, &config.styling)?;
    cli::write_report(&report, cli.output.as_ref())?;

    Ok(())
}
