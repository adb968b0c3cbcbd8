//! Read-only API commands: notifications, received texts, templates and PDFs.

use super::super::args::personalisation_from_pairs;
use super::super::CliContext;
use super::{print_json, print_json_line};
use anyhow::{Context, Result};
use notifications_client::{NotificationQuery, ReceivedTextQuery, TemplateType};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Handler for lookups against the API
pub struct LookupHandler<'a> {
    context: &'a CliContext,
}

impl<'a> LookupHandler<'a> {
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    pub fn handle_notification(&self, id: &str) -> Result<()> {
        let client = self.context.client()?;
        let notification = client
            .get_notification_by_id(id)
            .with_context(|| format!("Failed to fetch notification {id}"))?;
        print_json(&notification)
    }

    /// One page as a JSON document, or every match as JSON lines with `all`.
    pub fn handle_notifications(&self, query: NotificationQuery, all: bool) -> Result<()> {
        let client = self.context.client()?;

        if !all {
            let page = client
                .get_all_notifications(&query)
                .context("Failed to list notifications")?;
            return print_json(&page);
        }

        let mut count = 0usize;
        for notification in client.get_all_notifications_iterator(query) {
            print_json_line(&notification.context("Failed to list notifications")?)?;
            count += 1;
        }
        debug!("Listed {} notifications", count);
        Ok(())
    }

    pub fn handle_received_texts(&self, older_than: Option<String>, all: bool) -> Result<()> {
        let client = self.context.client()?;

        if !all {
            let mut query = ReceivedTextQuery::new();
            if let Some(cursor) = older_than {
                query = query.older_than(cursor);
            }
            let page = client
                .get_received_texts(&query)
                .context("Failed to list received text messages")?;
            return print_json(&page);
        }

        for text in client.get_received_texts_iterator() {
            print_json_line(&text.context("Failed to list received text messages")?)?;
        }
        Ok(())
    }

    pub fn handle_template(&self, id: &str, version: Option<u32>) -> Result<()> {
        let client = self.context.client()?;
        let template = match version {
            Some(version) => client.get_template_version(id, version),
            None => client.get_template(id),
        }
        .with_context(|| format!("Failed to fetch template {id}"))?;
        print_json(&template)
    }

    pub fn handle_preview(&self, id: &str, personalisation: &[String]) -> Result<()> {
        let personalisation = personalisation_from_pairs(personalisation)?;
        let client = self.context.client()?;
        let preview = client
            .post_template_preview(id, personalisation)
            .with_context(|| format!("Failed to preview template {id}"))?;
        print_json(&preview)
    }

    pub fn handle_templates(&self, template_type: Option<TemplateType>) -> Result<()> {
        let client = self.context.client()?;
        let templates = client
            .get_all_templates(template_type)
            .context("Failed to list templates")?;
        print_json(&templates)
    }

    pub fn handle_pdf(&self, id: &str, output: &Path) -> Result<()> {
        let client = self.context.client()?;
        let pdf = client
            .get_pdf_for_letter(id)
            .with_context(|| format!("Failed to download PDF for {id}"))?;
        fs::write(output, &pdf)
            .with_context(|| format!("Failed to write '{}'", output.display()))?;
        info!("Wrote {} bytes to {}", pdf.len(), output.display());
        Ok(())
    }
}
