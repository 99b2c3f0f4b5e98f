//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SEARCHIO_*)
//! 2. Alfred workflow variables (`alfred_workflow_data`, `alfred_workflow_cache`)
//! 3. TOML config file (if SEARCHIO_CONFIG_FILE set)
//! 4. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::assemble::ResultOptions;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SEARCHIO_*)
/// 2. Alfred workflow directory variables
/// 3. TOML config file (if SEARCHIO_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the `searches/<id>.json` documents.
    ///
    /// Set via SEARCHIO_DATA_DIR or alfred_workflow_data.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Root of the suggestion cache.
    ///
    /// Set via SEARCHIO_CACHE_DIR or alfred_workflow_cache.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Seconds a cached suggestion list stays fresh.
    ///
    /// Set via SEARCHIO_MAX_AGE_SECS environment variable.
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,

    /// Always append the literal query as the last suggestion.
    ///
    /// Set via SEARCHIO_INCLUDE_QUERY environment variable.
    #[serde(default)]
    pub include_query: bool,

    /// Tag suggestions with a stable uid because the UI does not sort them.
    ///
    /// Set via SEARCHIO_STABLE_ORDERING environment variable.
    #[serde(default = "default_true")]
    pub stable_ordering: bool,

    /// User-Agent string for suggest requests.
    ///
    /// Set via SEARCHIO_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes accepted from a suggest endpoint.
    ///
    /// Set via SEARCHIO_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./cache")
}

fn default_max_age_secs() -> u64 {
    900
}

fn default_user_agent() -> String {
    "searchio/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cache_dir: default_cache_dir(),
            max_age_secs: default_max_age_secs(),
            include_query: false,
            stable_ordering: true,
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl AppConfig {
    /// Cache freshness window.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }

    /// Directory containing the per-search JSON documents.
    pub fn searches_dir(&self) -> PathBuf {
        self.data_dir.join("searches")
    }

    /// Runtime options consumed by the result assembler.
    pub fn result_options(&self) -> ResultOptions {
        ResultOptions { include_query: self.include_query, stable_ordering: self.stable_ordering }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SEARCHIO_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment
            .merge(
                Env::raw()
                    .only(&["alfred_workflow_data", "alfred_workflow_cache"])
                    .map(|key| match key.as_str() {
                        "alfred_workflow_data" => "data_dir".into(),
                        _ => "cache_dir".into(),
                    }),
            )
            .merge(Env::prefixed("SEARCHIO_").ignore(&["CONFIG_FILE"]).map(|key| key.as_str().to_lowercase().into()));

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
