//! Configuration management handler
//!
//! Handles `init` and the `config` subcommands.

use super::super::{CliContext, ConfigAction};
use anyhow::Result;
use notifications_client::ConfigManager;
use std::path::PathBuf;

/// Handler for configuration operations
pub struct ConfigHandler<'a> {
    context: &'a CliContext,
}

impl<'a> ConfigHandler<'a> {
    /// Create new configuration handler
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    /// Handle configuration initialization
    ///
    /// Takes the project path directly because it runs before a
    /// [`CliContext`] exists; building one would already create the file.
    pub fn init(project_path: Option<PathBuf>, global: bool, force: bool) -> Result<()> {
        let path = if global {
            None
        } else {
            Some(project_path.unwrap_or_else(|| PathBuf::from(".")))
        };

        let config_path = ConfigManager::get_config_path(path.clone())?;
        let config_exists = config_path.exists();

        if config_exists && !force {
            println!("Configuration already initialized at: {}", config_path.display());
            println!("Use --force to overwrite");
            return Ok(());
        }

        if force && config_exists {
            std::fs::remove_file(&config_path)?;
        }

        let config_manager = match path {
            None => ConfigManager::new(None)?,
            Some(project) => ConfigManager::new_project_config(project)?,
        };
        config_manager.save()?;
        println!("Configuration initialized successfully at: {}", config_path.display());

        Ok(())
    }

    /// Handle configuration management
    pub fn handle_config(&self, action: ConfigAction) -> Result<()> {
        let mut config_manager = ConfigManager::new(self.context.project_path.clone())?;

        match action {
            ConfigAction::Show => {
                let mut config = config_manager.config().clone();
                if config.api.api_key.is_some() {
                    config.api.api_key = Some("[REDACTED]".to_string());
                }
                println!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigAction::Set { key, value } => {
                config_manager.set_value(&key, &value)?;
                config_manager.save()?;
                let shown = if key == "api.api_key" { "[REDACTED]" } else { value.as_str() };
                println!("Configuration updated: {key} = {shown}");
            }
            ConfigAction::Get { key } => {
                println!("{}", config_manager.get_value(&key)?);
            }
        }

        Ok(())
    }
}
