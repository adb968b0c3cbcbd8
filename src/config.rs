use crate::errors::{ClientError, ClientResult, ErrorContextExt};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.notifications.service.gov.uk";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONFIG_DIR: &str = ".notifications";

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for reaching the notifications API.
///
/// Keys missing from the file take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            user_agent: Some(format!("notifications-client/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Keys accepted by [`ConfigManager::get_value`] and [`ConfigManager::set_value`].
pub const CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "api.api_key",
    "api.timeout_secs",
    "api.user_agent",
    "logging.level",
];

/// Loads and saves the configuration file.
///
/// # Configuration Hierarchy
///
/// 1. **Project-level**: `.notifications/config.toml` in the project root
/// 2. **Global**: `~/.notifications/config.toml`
///
/// A project file wins when it exists. Otherwise an existing global file is
/// used, and failing both a default project file is written.
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Load the configuration for `project_path`, or the global one when `None`.
    ///
    /// # Errors
    ///
    /// Fails when the configuration directory cannot be created or the file
    /// cannot be read, parsed or (for a fresh file) written.
    pub fn new(project_path: Option<PathBuf>) -> ClientResult<Self> {
        if let Some(ref path) = project_path {
            let project_config_path = Self::get_config_path(Some(path.clone()))?;
            if project_config_path.exists() {
                return Self::open(project_config_path);
            }

            let global_config_path = Self::get_config_path(None)?;
            if global_config_path.exists() {
                return Self::open(global_config_path);
            }

            Self::open(project_config_path)
        } else {
            Self::open(Self::get_config_path(None)?)
        }
    }

    /// Always use the project-level file, creating it if needed.
    pub fn new_project_config(project_path: PathBuf) -> ClientResult<Self> {
        Self::open(Self::get_config_path(Some(project_path))?)
    }

    /// Load a configuration file from an explicit path.
    pub fn from_path(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let config_path = path.into();
        if !config_path.exists() {
            return Err(ClientError::ConfigNotFound { path: config_path });
        }
        Self::open(config_path)
    }

    fn open(config_path: PathBuf) -> ClientResult<Self> {
        let config = Self::load_or_create(&config_path)?;
        Ok(ConfigManager {
            config_path,
            config,
        })
    }

    pub fn get_config_path(project_path: Option<PathBuf>) -> ClientResult<PathBuf> {
        let base_path = if let Some(path) = project_path {
            path.join(CONFIG_DIR)
        } else {
            let base_dirs = BaseDirs::new()
                .ok_or_else(|| ClientError::config("Failed to get base directories"))?;
            base_dirs.home_dir().join(CONFIG_DIR)
        };

        fs::create_dir_all(&base_path)
            .in_file_operation(&base_path, "create config directory")?;

        Ok(base_path.join("config.toml"))
    }

    fn load_or_create(path: &Path) -> ClientResult<Config> {
        if path.exists() {
            let content = fs::read_to_string(path).in_file_operation(path, "read config file")?;
            Ok(toml::from_str(&content)?)
        } else {
            let config = Config::default();
            let content = toml::to_string_pretty(&config)
                .map_err(|e| ClientError::config_with_source("Failed to serialize default config", e))?;
            fs::write(path, content).in_file_operation(path, "write default config")?;
            Ok(config)
        }
    }

    /// Write the configuration back to the file it was loaded from.
    pub fn save(&self) -> ClientResult<()> {
        let content = toml::to_string_pretty(&self.config)
            .map_err(|e| ClientError::config_with_source("Failed to serialize config", e))?;
        fs::write(&self.config_path, content)
            .in_file_operation(&self.config_path, "write config file")?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Read a single value by dotted key. Unset optional values read as `"None"`.
    pub fn get_value(&self, key: &str) -> ClientResult<String> {
        let api = &self.config.api;
        let value = match key {
            "api.base_url" => api.base_url.clone(),
            "api.api_key" => api
                .api_key
                .as_ref()
                .map(|_| "[REDACTED]".to_string())
                .unwrap_or_else(|| "None".to_string()),
            "api.timeout_secs" => api
                .timeout_secs
                .map(|secs| secs.to_string())
                .unwrap_or_else(|| "None".to_string()),
            "api.user_agent" => api.user_agent.clone().unwrap_or_else(|| "None".to_string()),
            "logging.level" => self.config.logging.level.clone(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a single value by dotted key. An empty value clears optional keys.
    pub fn set_value(&mut self, key: &str, value: &str) -> ClientResult<()> {
        let optional = || (!value.is_empty()).then(|| value.to_string());
        let api = &mut self.config.api;
        match key {
            "api.base_url" => {
                url::Url::parse(value).map_err(|e| ClientError::InvalidBaseUrl {
                    url: value.to_string(),
                    source: Some(Box::new(e)),
                })?;
                api.base_url = value.to_string();
            }
            "api.api_key" => api.api_key = optional(),
            "api.timeout_secs" => {
                api.timeout_secs = match optional() {
                    Some(secs) => Some(secs.parse().map_err(|_| {
                        ClientError::invalid_argument(key, "must be a whole number of seconds")
                    })?),
                    None => None,
                }
            }
            "api.user_agent" => api.user_agent = optional(),
            "logging.level" => self.config.logging.level = value.to_string(),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ClientError {
    ClientError::invalid_argument(
        key,
        format!("unknown configuration key, expected one of {}", CONFIG_KEYS.join(", ")),
    )
}
