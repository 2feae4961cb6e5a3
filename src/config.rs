use std::{env, path::PathBuf, time::Duration};

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub remote: RemoteConfig,
    pub cache: CacheConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Bearer token for the dashboard API
    #[serde(default)]
    pub token: Option<String>,
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub dir: PathBuf,
    pub key: String,
    /// When false the schedule is only cached for the lifetime of the process
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DULCEVIDA__REMOTE__BASE_URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("remote.base_url", "http://localhost:8000/api/v1")?
            .set_default("remote.timeout_secs", 10)?
            .set_default("cache.dir", ".dulcevida")?
            .set_default("cache.key", dulcevida_schedule::DEFAULT_CACHE_KEY)?
            .set_default("cache.enabled", true)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("DULCEVIDA")
                .separator("__")
                .try_parsing(true),
        );

        // Token shared with the rest of the dashboard tooling
        if let Ok(token) = env::var("API_TOKEN") {
            builder = builder.set_override("remote.token", token)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.remote.base_url)
            .map_err(|e| format!("Remote base_url is invalid: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Remote base_url must use http or https, got {}",
                url.scheme()
            ));
        }
        if self.remote.timeout_secs == 0 {
            return Err("Remote timeout_secs must be greater than 0".to_string());
        }
        if self.cache.key.trim().is_empty() {
            return Err("Cache key must not be empty".to_string());
        }
        Ok(())
    }
}
