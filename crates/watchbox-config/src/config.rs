use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use watchbox_models::{KindFilter, YearRange, DEFAULT_YEAR_MAX, DEFAULT_YEAR_MIN};

pub const DEFAULT_CATALOG_URL: &str = "https://www.omdbapi.com/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("year_min ({min}) must not be greater than year_max ({max})")]
    InvalidYearBounds { min: i32, max: i32 },

    #[error("catalog base_url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("load_more_threshold must be greater than zero")]
    ZeroLoadMoreThreshold,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// No timeout unless set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_year_min")]
    pub year_min: i32,
    #[serde(default = "default_year_max")]
    pub year_max: i32,
    #[serde(default)]
    pub default_kind: KindFilter,
    /// Rows from the end of the list at which the next page is fetched
    #[serde(default = "default_load_more_threshold")]
    pub load_more_threshold: usize,
}

fn default_base_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_year_min() -> i32 {
    DEFAULT_YEAR_MIN
}

fn default_year_max() -> i32 {
    DEFAULT_YEAR_MAX
}

fn default_load_more_threshold() -> usize {
    3
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            year_min: default_year_min(),
            year_max: default_year_max(),
            default_kind: KindFilter::Any,
            load_more_threshold: default_load_more_threshold(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file found; using defaults");
            return Ok(Self::default());
        }
        let config = Self::load_from_file(path)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.year_min > self.search.year_max {
            return Err(ConfigError::InvalidYearBounds {
                min: self.search.year_min,
                max: self.search.year_max,
            });
        }

        let url = self.catalog.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.catalog.base_url.clone()));
        }

        if self.catalog.request_timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }

        if self.search.load_more_threshold == 0 {
            return Err(ConfigError::ZeroLoadMoreThreshold);
        }

        Ok(())
    }

    /// Bounds for the year-range control
    pub fn year_bounds(&self) -> Result<YearRange, ConfigError> {
        YearRange::new(self.search.year_min, self.search.year_max).map_err(|_| ConfigError::InvalidYearBounds {
            min: self.search.year_min,
            max: self.search.year_max,
        })
    }
}
