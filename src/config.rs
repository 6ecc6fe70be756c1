//! Configuration management for verus using the prefer crate.
//!
//! `Config` is the on-disk shape (every field optional), `Settings` holds the
//! resolved runtime values. Priority, lowest first: defaults, config file,
//! environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::age::AgeThresholds;
use crate::services::date_detection::DEFAULT_URL_MIN_YEAR;

/// Name used for config file discovery (`verus.toml`, `verus.json`, ...).
pub const CONFIG_NAME: &str = "verus";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Inclusive upper bounds of the fresh and aging buckets.
    pub age_thresholds: AgeThresholds,
    /// Oldest year accepted from a URL path.
    pub url_min_year: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            age_thresholds: AgeThresholds::default(),
            url_min_year: DEFAULT_URL_MIN_YEAR,
        }
    }
}

impl Settings {
    /// Reject threshold combinations that would make a bucket unreachable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.age_thresholds;
        if t.fresh_days < 0 || t.aging_days < 0 {
            return Err(ConfigError::Invalid(
                "age thresholds must not be negative".to_string(),
            ));
        }
        if t.fresh_days > t.aging_days {
            return Err(ConfigError::Invalid(format!(
                "age.fresh_days ({}) must not exceed age.aging_days ({})",
                t.fresh_days, t.aging_days
            )));
        }
        Ok(())
    }
}

/// Age bucket section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeConfig {
    /// Last day (inclusive) a result counts as fresh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fresh_days: Option<i64>,
    /// Last day (inclusive) a result counts as aging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aging_days: Option<i64>,
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub age: AgeConfig,
    /// Oldest year accepted from a URL path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_min_year: Option<i32>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when no config file is found or the discovered
    /// file cannot be used.
    pub async fn load() -> Result<Self, ConfigError> {
        match prefer::load(CONFIG_NAME).await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => Ok(Self::load_discovered(path).await),
                None => Ok(Self::default()),
            },
            Err(e) => {
                tracing::debug!("No config file discovered: {}", e);
                Ok(Self::default())
            }
        }
    }

    /// Load an auto-discovered file, warning and using defaults on failure.
    pub(crate) async fn load_discovered(path: &Path) -> Self {
        match Self::load_from_path(path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file path.
    /// The format is chosen by extension: TOML, YAML, otherwise JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_err = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents).map_err(|e| parse_err("TOML", e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).map_err(|e| parse_err("YAML", e.to_string()))?
            }
            _ => serde_json::from_str(&contents).map_err(|e| parse_err("JSON", e.to_string()))?,
        };

        tracing::debug!("Loaded config from {}", path.display());
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(fresh) = self.age.fresh_days {
            settings.age_thresholds.fresh_days = fresh;
        }
        if let Some(aging) = self.age.aging_days {
            settings.age_thresholds.aging_days = aging;
        }
        if let Some(year) = self.url_min_year {
            settings.url_min_year = year;
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Read an environment override, ignoring unset, empty or unparseable values.
fn env_override<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok().filter(|s| !s.is_empty())?;
    match raw.parse() {
        Ok(value) => {
            tracing::debug!("Using {} from environment: {}", name, raw);
            Some(value)
        }
        Err(_) => {
            tracing::warn!("Ignoring unparseable {}={}", name, raw);
            None
        }
    }
}

/// Apply `VERUS_*` environment variables on top of `settings`.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Some(fresh) = env_override("VERUS_FRESH_DAYS") {
        settings.age_thresholds.fresh_days = fresh;
    }
    if let Some(aging) = env_override("VERUS_AGING_DAYS") {
        settings.age_thresholds.aging_days = aging;
    }
    if let Some(year) = env_override("VERUS_URL_MIN_YEAR") {
        settings.url_min_year = year;
    }
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(
    options: LoadOptions,
) -> Result<(Settings, Config), ConfigError> {
    // Priority 1: explicit --config flag, Priority 2: auto-discovery
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await?,
        None => Config::load().await?,
    };

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    apply_env_overrides(&mut settings);
    settings.validate()?;

    Ok((settings, config))
}
