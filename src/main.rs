use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::sync::Arc;
use std::time::Duration;
use webpify::{Cli, ConvertConfig, Coordinator, ImageCodec};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let config = ConvertConfig::from(&cli);
    let codec = ImageCodec::new(config.format);

    let coordinator = Coordinator::new(&config, Arc::new(codec))
        .context("Invalid configuration")?
        .with_progress(create_spinner());

    log::info!(
        "Converting files matching {} under {} director{}",
        coordinator.matcher().pattern(),
        config.directories.len(),
        if config.directories.len() == 1 { "y" } else { "ies" }
    );

    // Per-file failures are logged by the workers and never change the exit status.
    coordinator.run();

    Ok(())
}

fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
