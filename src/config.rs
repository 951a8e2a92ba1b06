use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Provider connection settings. Classification thresholds are fixed
/// constants in the engine and deliberately absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_base: String,
    pub timeout_ms: u64,
    pub tweet_limit: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.twitterapi.io/twitter".to_string(),
            timeout_ms: 10_000,
            tweet_limit: 20,
        }
    }
}

impl ProviderConfig {
    pub fn load(path: Option<PathBuf>) -> Result<Self, String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                ProviderConfig::default()
            }
        } else {
            ProviderConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_base) = env::var("PROVIDER_API_BASE") {
            if !api_base.trim().is_empty() {
                self.api_base = api_base;
            }
        }
        if let Ok(timeout) = env::var("PROVIDER_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.timeout_ms = value;
            }
        }
        if let Ok(limit) = env::var("PROVIDER_TWEET_LIMIT") {
            if let Ok(value) = limit.parse::<usize>() {
                self.tweet_limit = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("PROVIDER_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/provider.toml")))
}
