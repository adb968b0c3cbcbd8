//! Notification sending handler
//!
//! Builds the request for each `send` subcommand and either prints it
//! (`--dry-run`) or sends it.

use super::super::args::personalisation_from_options;
use super::super::commands::SendCommand;
use super::super::CliContext;
use super::print_json;
use anyhow::{Context, Result};
use notifications_client::{
    EmailRequest, LetterRequest, NotificationRequest, PrecompiledLetterRequest, SmsRequest,
};
use std::fs::File;
use tracing::info;

/// Handler for send operations
pub struct SendHandler<'a> {
    context: &'a CliContext,
}

impl<'a> SendHandler<'a> {
    /// Create new send handler
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    pub fn handle_send(&self, kind: SendCommand, dry_run: bool) -> Result<()> {
        let request = build_request(kind)?;

        if dry_run {
            println!("Dry run - would send POST {}", request.path());
            print_json(&request.body()?)?;
            return Ok(());
        }

        let client = self.context.client()?;
        let response = client.send(&request).context("Failed to send notification")?;
        info!(id = %response.id, "notification accepted");
        print_json(&response)
    }
}

/// Translate a `send` subcommand into a request.
pub fn build_request(kind: SendCommand) -> Result<NotificationRequest> {
    let request = match kind {
        SendCommand::Sms {
            template,
            phone,
            sms_sender_id,
            options,
        } => {
            let personalisation = personalisation_from_options(&options)?;
            let mut request = SmsRequest::new(template, phone);
            if !personalisation.is_empty() {
                request = request.personalisation(personalisation);
            }
            if let Some(reference) = options.reference {
                request = request.reference(reference);
            }
            if let Some(sender) = sms_sender_id {
                request = request.sms_sender_id(sender);
            }
            request.into()
        }
        SendCommand::Email {
            template,
            email,
            email_reply_to_id,
            one_click_unsubscribe_url,
            options,
        } => {
            let personalisation = personalisation_from_options(&options)?;
            let mut request = EmailRequest::new(template, email);
            if !personalisation.is_empty() {
                request = request.personalisation(personalisation);
            }
            if let Some(reference) = options.reference {
                request = request.reference(reference);
            }
            if let Some(reply_to) = email_reply_to_id {
                request = request.email_reply_to_id(reply_to);
            }
            if let Some(url) = one_click_unsubscribe_url {
                request = request.one_click_unsubscribe_url(url);
            }
            request.into()
        }
        SendCommand::Letter { template, options } => {
            let personalisation = personalisation_from_options(&options)?;
            if personalisation.is_empty() {
                anyhow::bail!("Letters need the address in personalisation, e.g. -p address_line_1=...");
            }
            let mut request = LetterRequest::new(template, personalisation);
            if let Some(reference) = options.reference {
                request = request.reference(reference);
            }
            request.into()
        }
        SendCommand::PrecompiledLetter {
            reference,
            file,
            postage,
        } => {
            let pdf = File::open(&file)
                .with_context(|| format!("Failed to open '{}'", file.display()))?;
            let mut request = PrecompiledLetterRequest::from_reader(reference, pdf)
                .with_context(|| format!("Failed to read '{}'", file.display()))?;
            if let Some(postage) = postage {
                request = request.postage(postage);
            }
            request.into()
        }
    };
    Ok(request)
}
