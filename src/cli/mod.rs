//! CLI module providing command-line interface functionality
//!
//! Handles argument parsing and routes commands to their handlers.

pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;

use anyhow::Result;
use clap::Parser;
use notifications_client::ClientError;
use tracing::error;

pub use commands::{Cli, Commands, ConfigAction};
pub use context::CliContext;
pub use handlers::CommandHandler;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Parse command line arguments and execute the requested command
    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        let handler = CommandHandler::new(cli.project, cli.verbose, cli.api_key);

        let result = handler.handle_command(cli.command);
        if let Err(err) = &result {
            if let Some(client_err) = err.downcast_ref::<ClientError>() {
                error!(
                    category = client_err.category(),
                    retryable = client_err.is_retryable(),
                    "command failed: {client_err}"
                );
            }
        }
        result
    }
}
