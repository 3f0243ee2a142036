pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::{AppConfig, DEFAULT_SGS_BASE_URL};
use crate::providers::sgs::SgsProvider;
use anyhow::Result;
use chrono::Datelike;
use tracing::{debug, info};

pub enum AppCommand {
    Rates,
    Projection,
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    year: Option<i32>,
) -> Result<()> {
    info!("Savings yield projector starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let base_url = config
        .providers
        .sgs
        .as_ref()
        .map_or(DEFAULT_SGS_BASE_URL, |p| &p.base_url);
    let provider = SgsProvider::new(base_url);

    let year = year.unwrap_or_else(|| chrono::Local::now().year());
    debug!("Using reference year {year}");

    match command {
        AppCommand::Rates => cli::rates::run(&provider, &config.series, year).await,
        AppCommand::Projection => cli::projection::run(&provider, &config.series, year).await,
    }
}
