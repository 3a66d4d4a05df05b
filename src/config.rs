use crate::constants::{
    DEFAULT_CHAIN_PATH, DEFAULT_ENDPOINT, DEFAULT_FLASH_MS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_REQUEST_TIMEOUT_MS,
};
use crate::errors::{ChainwatchError, ChainwatchResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the ledger service.
    pub endpoint: String,
    pub chain_path: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    /// How long the affordance stays highlighted after new blocks arrive while the panel is closed.
    pub flash_ms: u64,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            chain_path: DEFAULT_CHAIN_PATH.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            flash_ms: DEFAULT_FLASH_MS,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn chain_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), self.chain_path)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("chainwatch")
                .join("logs")
        })
    }
}

/// Values that take precedence over the config file, from the environment or the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub poll_interval_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Reads `CHAINWATCH_ENDPOINT` and `CHAINWATCH_POLL_MS`.
    pub fn from_env() -> ChainwatchResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ChainwatchResult<Self> {
        let poll_interval_ms = match lookup("CHAINWATCH_POLL_MS") {
            Some(raw) => Some(raw.trim().parse().map_err(|e| {
                ChainwatchError::config_error(format!("CHAINWATCH_POLL_MS is not a number: {}", e))
            })?),
            None => None,
        };
        Ok(Self {
            endpoint: lookup("CHAINWATCH_ENDPOINT"),
            poll_interval_ms,
        })
    }

    /// Layers `other` on top of `self`.
    pub fn merge(self, other: ConfigOverrides) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            poll_interval_ms: other.poll_interval_ms.or(self.poll_interval_ms),
        }
    }

    fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poll_interval_ms = ms;
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads (or creates) the config file, applies overrides, validates and installs the result
/// for [`get_config`].
pub fn initialize_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> ChainwatchResult<Config> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };

    let mut config = load_or_create(&config_path)?;
    overrides.apply(&mut config);
    validate_config(&config)?;

    *CONFIG.write().unwrap_or_else(|e| e.into_inner()) = config.clone();
    Ok(config)
}

/// Reads the config at `path`, writing the defaults there first if it does not exist.
pub fn load_or_create(path: &Path) -> ChainwatchResult<Config> {
    if path.exists() {
        let config_str = fs::read_to_string(path).map_err(|e| {
            ChainwatchError::config_error(format!("Failed to read config file: {}", e))
        })?;
        return serde_json::from_str(&config_str)
            .map_err(|e| ChainwatchError::config_error(format!("Failed to parse config: {}", e)));
    }

    let config = Config::default();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ChainwatchError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }
    let config_str = serde_json::to_string_pretty(&config)
        .map_err(|e| ChainwatchError::config_error(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, config_str)
        .map_err(|e| ChainwatchError::config_error(format!("Failed to write config file: {}", e)))?;
    Ok(config)
}

fn get_config_path() -> ChainwatchResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChainwatchError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("chainwatch").join("config.json"))
}

pub fn validate_config(config: &Config) -> ChainwatchResult<()> {
    if config.endpoint.is_empty() {
        return Err(ChainwatchError::config_error("endpoint is required"));
    }

    if !(config.endpoint.starts_with("http://") || config.endpoint.starts_with("https://")) {
        return Err(ChainwatchError::config_error(format!(
            "endpoint must be an http(s) URL, got {}",
            config.endpoint
        )));
    }

    if !config.chain_path.starts_with('/') {
        return Err(ChainwatchError::config_error("chain_path must start with '/'"));
    }

    if config.poll_interval_ms == 0 {
        return Err(ChainwatchError::config_error("poll_interval_ms must be greater than 0"));
    }

    if config.request_timeout_ms == 0 {
        return Err(ChainwatchError::config_error("request_timeout_ms must be greater than 0"));
    }

    if config.flash_ms == 0 {
        return Err(ChainwatchError::config_error("flash_ms must be greater than 0"));
    }

    Ok(())
}

/// The config installed by [`initialize_config`], or the defaults before that.
pub fn get_config() -> Config {
    CONFIG.read().unwrap_or_else(|e| e.into_inner()).clone()
}
