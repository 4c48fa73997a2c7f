use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_COIN: &str = "bitcoin";
pub const DEFAULT_CURRENCY: &str = "eur";
pub const DEFAULT_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Market-data identifier of the coin, e.g. `bitcoin`.
    pub coin: String,
    /// Quote currency, e.g. `eur`.
    pub currency: String,
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            coin: DEFAULT_COIN.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_seconds: 30,
            user_agent: format!("coin-trend/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Loads the config file at `path`, falling back to defaults when it does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}
