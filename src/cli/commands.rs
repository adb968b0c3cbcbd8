//! Command definitions and structures for the CLI
//!
//! clap-based argument definitions for the main CLI structure and all
//! subcommands.

use clap::{Args, Parser, Subcommand};
use notifications_client::TemplateType;
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "notifications")]
#[command(about = "Command line client for the notifications API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project path for project-level configuration
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,

    /// API key, overriding the configured one
    #[arg(long, global = true, env = "NOTIFICATIONS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize configuration
    Init {
        /// Initialize global configuration (default is project-level)
        #[arg(short, long)]
        global: bool,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Configure settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Send a notification
    Send {
        #[command(subcommand)]
        kind: SendCommand,

        /// Print the request body instead of sending it
        #[arg(long, global = true)]
        dry_run: bool,
    },

    /// Show one notification and its status
    Notification {
        /// Notification ID
        id: String,
    },

    /// List notifications, newest first
    Notifications {
        #[arg(long)]
        status: Option<String>,

        /// sms, email or letter
        #[arg(long)]
        template_type: Option<TemplateType>,

        #[arg(long)]
        reference: Option<String>,

        /// Only notifications older than this notification ID
        #[arg(long)]
        older_than: Option<String>,

        /// Include notifications sent from batch uploads
        #[arg(long)]
        include_jobs: bool,

        /// Follow pagination and print every match, one per line
        #[arg(long)]
        all: bool,
    },

    /// List received text messages, newest first
    ReceivedTexts {
        #[arg(long, conflicts_with = "all")]
        older_than: Option<String>,

        /// Follow pagination and print every message, one per line
        #[arg(long)]
        all: bool,
    },

    /// Show a template
    Template {
        /// Template ID
        id: String,

        /// Specific version instead of the latest
        #[arg(long)]
        version: Option<u32>,
    },

    /// Render a template with personalisation
    Preview {
        /// Template ID
        id: String,

        /// Personalisation value as key=value (repeatable)
        #[arg(short, long = "personalisation", value_name = "KEY=VALUE")]
        personalisation: Vec<String>,
    },

    /// List templates
    Templates {
        /// sms, email or letter
        #[arg(long = "type")]
        template_type: Option<TemplateType>,
    },

    /// Download the PDF of a letter
    Pdf {
        /// Notification ID
        id: String,

        /// File to write the PDF to
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Configuration management actions
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,
        /// Value to set; empty clears optional keys
        value: String,
    },

    /// Get configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

/// Notification kinds accepted by `send`
#[derive(Subcommand)]
pub enum SendCommand {
    /// Send a text message
    Sms {
        #[arg(short, long)]
        template: String,

        /// Recipient phone number
        #[arg(long)]
        phone: String,

        /// Sender ID to send from instead of the service default
        #[arg(long)]
        sms_sender_id: Option<String>,

        #[command(flatten)]
        options: SendOptions,
    },

    /// Send an email
    Email {
        #[arg(short, long)]
        template: String,

        /// Recipient email address
        #[arg(long)]
        email: String,

        /// Reply-to address ID instead of the service default
        #[arg(long)]
        email_reply_to_id: Option<String>,

        #[arg(long)]
        one_click_unsubscribe_url: Option<String>,

        #[command(flatten)]
        options: SendOptions,
    },

    /// Send a letter; address lines go in personalisation
    Letter {
        #[arg(short, long)]
        template: String,

        #[command(flatten)]
        options: SendOptions,
    },

    /// Send a pre-rendered PDF as a letter
    PrecompiledLetter {
        /// Reference identifying the letter
        #[arg(long)]
        reference: String,

        /// PDF file to send
        #[arg(long)]
        file: PathBuf,

        /// first, second, economy, europe or rest-of-world
        #[arg(long)]
        postage: Option<String>,
    },
}

/// Options shared by the templated notification kinds
#[derive(Args)]
pub struct SendOptions {
    /// Personalisation value as key=value (repeatable)
    #[arg(short, long = "personalisation", value_name = "KEY=VALUE")]
    pub personalisation: Vec<String>,

    /// Attach a file as personalisation key=path (repeatable)
    #[arg(long = "attach", value_name = "KEY=PATH")]
    pub attachments: Vec<String>,

    /// Ask recipients to confirm their email before downloading attachments
    #[arg(long)]
    pub confirm_email_before_download: bool,

    /// How long attachments stay available, e.g. "26 weeks"
    #[arg(long)]
    pub retention_period: Option<String>,

    /// Reference identifying the notification
    #[arg(long)]
    pub reference: Option<String>,
}
