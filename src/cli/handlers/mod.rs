//! Command handlers for all CLI operations
//!
//! Each handler borrows the shared [`CliContext`] and owns one group of
//! commands; [`CommandHandler`] routes parsed commands to them.

mod config;
mod lookup;
mod send;

pub use config::ConfigHandler;
pub use lookup::LookupHandler;
pub use send::SendHandler;

use super::{CliContext, Commands};
use anyhow::Result;
use notifications_client::NotificationQuery;
use serde::Serialize;
use std::path::PathBuf;

/// Routes parsed commands to their handlers.
///
/// `init` runs before any configuration is loaded so it can create the file;
/// every other command gets a fresh [`CliContext`] with logging set up.
pub struct CommandHandler {
    project_path: Option<PathBuf>,
    verbose: bool,
    api_key: Option<String>,
}

impl CommandHandler {
    pub fn new(project_path: Option<PathBuf>, verbose: bool, api_key: Option<String>) -> Self {
        Self {
            project_path,
            verbose,
            api_key,
        }
    }

    fn context(&self) -> Result<CliContext> {
        let context = CliContext::new(self.project_path.clone(), self.verbose, self.api_key.clone())?;
        context.init_logging()?;
        Ok(context)
    }

    /// Route commands to their appropriate handlers
    pub fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Init { global, force } => {
                ConfigHandler::init(self.project_path.clone(), global, force)
            }
            Commands::Config { action } => ConfigHandler::new(&self.context()?).handle_config(action),
            Commands::Send { kind, dry_run } => {
                SendHandler::new(&self.context()?).handle_send(kind, dry_run)
            }
            Commands::Notification { id } => {
                LookupHandler::new(&self.context()?).handle_notification(&id)
            }
            Commands::Notifications {
                status,
                template_type,
                reference,
                older_than,
                include_jobs,
                all,
            } => {
                let mut query = NotificationQuery::new().include_jobs(include_jobs);
                if let Some(status) = status {
                    query = query.status(status);
                }
                if let Some(template_type) = template_type {
                    query = query.template_type(template_type);
                }
                if let Some(reference) = reference {
                    query = query.reference(reference);
                }
                if let Some(older_than) = older_than {
                    query = query.older_than(older_than);
                }
                LookupHandler::new(&self.context()?).handle_notifications(query, all)
            }
            Commands::ReceivedTexts { older_than, all } => {
                LookupHandler::new(&self.context()?).handle_received_texts(older_than, all)
            }
            Commands::Template { id, version } => {
                LookupHandler::new(&self.context()?).handle_template(&id, version)
            }
            Commands::Preview { id, personalisation } => {
                LookupHandler::new(&self.context()?).handle_preview(&id, &personalisation)
            }
            Commands::Templates { template_type } => {
                LookupHandler::new(&self.context()?).handle_templates(template_type)
            }
            Commands::Pdf { id, output } => {
                LookupHandler::new(&self.context()?).handle_pdf(&id, &output)
            }
        }
    }
}

/// Pretty-printed JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Compact JSON on a single stdout line.
pub(crate) fn print_json_line<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
