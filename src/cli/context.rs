//! CLI Context for dependency injection and shared state
//!
//! Centralizes configuration loading, logging setup and client construction
//! so handlers only deal with their own command.

use anyhow::{Context, Result};
use notifications_client::{ApiConfig, ConfigManager, NotificationsClient};
use std::path::PathBuf;
use std::sync::Arc;

/// CLI execution context containing shared dependencies and configuration
#[derive(Clone)]
pub struct CliContext {
    pub project_path: Option<PathBuf>,
    pub verbose: bool,
    pub api_key: Option<String>,
    pub config_manager: Arc<ConfigManager>,
}

impl CliContext {
    /// Create a new CLI context with the specified project path and verbosity
    pub fn new(project_path: Option<PathBuf>, verbose: bool, api_key: Option<String>) -> Result<Self> {
        let resolved_project_path = Self::resolve_project_path(project_path);
        let config_manager = Arc::new(ConfigManager::new(resolved_project_path.clone())?);

        Ok(Self {
            project_path: resolved_project_path,
            verbose,
            api_key,
            config_manager,
        })
    }

    /// Auto-detect project path by looking for .notifications/config.toml
    fn resolve_project_path(project_path: Option<PathBuf>) -> Option<PathBuf> {
        if let Some(path) = project_path {
            return Some(path);
        }

        if let Ok(current_dir) = std::env::current_dir() {
            let config_path = current_dir.join(".notifications").join("config.toml");
            if config_path.exists() {
                return Some(current_dir);
            }
        }

        None
    }

    /// Initialize logging on stderr so stdout stays machine readable
    pub fn init_logging(&self) -> Result<()> {
        let log_level: &str = if self.verbose {
            "debug"
        } else {
            &self.config_manager.config().logging.level
        };

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env().add_directive(
                    log_level
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::INFO.into()),
                ),
            )
            .init();

        if self.verbose {
            tracing::debug!("Verbose logging enabled");
            tracing::debug!("Project path: {:?}", self.project_path);
            tracing::debug!("Config path: {}", self.config_manager.config_path().display());
        }

        Ok(())
    }

    /// API settings with the command-line key applied
    pub fn api_config(&self) -> ApiConfig {
        let mut api = self.config_manager.config().api.clone();
        if let Some(key) = &self.api_key {
            api.api_key = Some(key.clone());
        }
        api
    }

    pub fn client(&self) -> Result<NotificationsClient> {
        let api = self.api_config();
        if api.api_key.is_none() {
            anyhow::bail!(
                "No API key configured. Set NOTIFICATIONS_API_KEY, pass --api-key, or run `notifications config set api.api_key <key>`"
            );
        }
        NotificationsClient::from_config(&api).context("Failed to create API client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Project directory with its own config so the global file never leaks in.
    fn project_dir() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        ConfigManager::new_project_config(temp_dir.path().to_path_buf()).unwrap();
        temp_dir
    }

    #[test]
    fn test_context_creation() {
        let temp_dir = project_dir();
        let context = CliContext::new(Some(temp_dir.path().to_path_buf()), false, None).unwrap();

        assert_eq!(context.project_path, Some(temp_dir.path().to_path_buf()));
        assert!(!context.verbose);
        assert_eq!(
            context.config_manager.config().api.base_url,
            notifications_client::config::DEFAULT_BASE_URL
        );
    }

    #[test]
    fn test_context_rejects_unusable_project_path() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not-a-directory");
        std::fs::write(&file, b"").unwrap();

        assert!(CliContext::new(Some(file), false, None).is_err());
    }

    #[test]
    fn test_api_key_override() {
        let temp_dir = project_dir();
        let context = CliContext::new(
            Some(temp_dir.path().to_path_buf()),
            false,
            Some("from-env".to_string()),
        )
        .unwrap();

        assert_eq!(context.api_config().api_key.as_deref(), Some("from-env"));
        assert!(context.client().is_ok());
    }

    #[test]
    fn test_client_requires_api_key() {
        let temp_dir = project_dir();
        let context = CliContext::new(Some(temp_dir.path().to_path_buf()), false, None).unwrap();
        assert!(context.client().is_err());
    }
}
