//! Application configuration, persisted as TOML.

use crate::error::{AppError, Result};
use crate::settings::Settings;
use ebooktw_api::ClientConfig;
use ebooktw_api::config::{DEFAULT_BASE_URL, DEFAULT_DEV_PORT};
use ebooktw_api::parameter::DEFAULT_SHARE_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search API connection settings.
    pub api: ApiConfig,
    /// Behaviour toggles.
    pub settings: Settings,
    /// Search history storage.
    pub history: HistoryConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Search API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host of the API.
    pub base_url: String,
    /// Port of the pre-production API.
    pub dev_port: u16,
    /// Custom User-Agent (None = `EbookTW/{version} ({os}; {arch})`).
    pub user_agent: Option<String>,
    /// Request timeout in seconds (0 = HTTP client default).
    pub timeout_seconds: u64,
    /// Web front-end that share links point at.
    pub share_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dev_port: DEFAULT_DEV_PORT,
            user_agent: None,
            timeout_seconds: 0,
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Convert to the API crate's client configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            dev_port: self.dev_port,
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.timeout_seconds,
            share_base_url: self.share_base_url.clone(),
        }
    }
}

/// Search history storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of keywords kept; oldest are dropped first.
    pub max_entries: usize,
    /// History file (None = `data_dir()/history.json`).
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: 200,
            path: None,
        }
    }
}

impl HistoryConfig {
    /// The history file this configuration points at.
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(crate::app_dirs::history_file)
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to a daily rolling file under `data_dir()/logs/`.
    pub file: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the default config file if it exists,
    /// else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested file cannot be loaded,
    /// or the default file exists but is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::app_dirs::config_file()
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] for an unusable API base URL or dev
    /// port, or a zero history capacity.
    pub fn validate(&self) -> Result<()> {
        self.api
            .to_client_config()
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        if self.history.max_entries == 0 {
            return Err(AppError::Config(
                "history.max_entries must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
