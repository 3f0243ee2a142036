use crate::core::series::SeriesId;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Default base URL of the Banco Central do Brasil open data API.
pub const DEFAULT_SGS_BASE_URL: &str = "https://api.bcb.gov.br";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SgsProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub sgs: Option<SgsProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            sgs: Some(SgsProviderConfig {
                base_url: DEFAULT_SGS_BASE_URL.to_string(),
            }),
        }
    }
}

/// SGS series codes to query. The defaults are the published SELIC and TR
/// accumulated-in-year series; overriding them is only useful when the
/// service renumbers a series.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeriesConfig {
    #[serde(default = "SeriesConfig::default_selic")]
    pub selic: u32,
    #[serde(default = "SeriesConfig::default_tr")]
    pub tr: u32,
}

impl SeriesConfig {
    fn default_selic() -> u32 {
        SeriesId::SELIC_ACCUMULATED.0
    }

    fn default_tr() -> u32 {
        SeriesId::TR_ACCUMULATED.0
    }

    pub fn selic(&self) -> SeriesId {
        SeriesId(self.selic)
    }

    pub fn tr(&self) -> SeriesId {
        SeriesId(self.tr)
    }
}

impl Default for SeriesConfig {
    fn default() -> Self {
        SeriesConfig {
            selic: Self::default_selic(),
            tr: Self::default_tr(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub series: SeriesConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file exists. A file that exists but does not parse
    /// is an error.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file at {}; using defaults", config_path.display());
            return Ok(AppConfig::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("br", "poupanca", "poupanca")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
