//! Application configuration - where the inventory backend lives.
//!
//! Resolution order: the `SALESDESK_API_URL` environment variable wins, then the
//! optional `config.toml` next to the binary, then the stock local backend address.
//! A `.env` file is loaded by `main` before this module runs.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env, fs, path::Path};

/// Backend address used when neither the environment nor a config file names one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Application configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the inventory backend, without a trailing path.
    pub api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Loads configuration from an explicit TOML file path.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref)
        .map_err(|e| Error::Config {
            message: format!("Failed to read config file {path_ref:?}: {e}"),
        })?;
    let app_config: AppConfig = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from config file {path_ref:?}: {e}"),
    })?;
    Ok(app_config)
}

/// Resolves the effective application configuration.
///
/// `SALESDESK_API_URL` overrides everything; otherwise `config.toml` is used if it
/// exists, and the default local backend address if it does not. A config file that
/// exists but cannot be read or parsed is an error, not a silent fallback.
pub fn load_app_configuration() -> Result<AppConfig> {
    if let Ok(url) = env::var("SALESDESK_API_URL") {
        if !url.trim().is_empty() {
            tracing::info!("Using backend URL from SALESDESK_API_URL");
            return Ok(AppConfig {
                api_url: url.trim().trim_end_matches('/').to_string(),
            });
        }
    }

    let path = Path::new("config.toml");
    if path.exists() {
        let mut config = load_config(path)?;
        config.api_url = config.api_url.trim_end_matches('/').to_string();
        tracing::info!("Loaded configuration from {:?}", path);
        return Ok(config);
    }

    tracing::info!("No configuration found; using default backend {DEFAULT_API_URL}");
    Ok(AppConfig::default())
}
