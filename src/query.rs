//! Query strings for the list endpoints
//!
//! Each endpoint has its own filter struct. Filters are emitted once each, in
//! declaration order, and only when supplied.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

use crate::errors::ClientError;

/// Kind of template a notification was sent from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Sms,
    Email,
    Letter,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Sms => "sms",
            TemplateType::Email => "email",
            TemplateType::Letter => "letter",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sms" => Ok(TemplateType::Sms),
            "email" => Ok(TemplateType::Email),
            "letter" => Ok(TemplateType::Letter),
            other => Err(ClientError::invalid_argument(
                "template_type",
                format!("expected sms, email or letter, got '{other}'"),
            )),
        }
    }
}

/// Filters accepted by a list endpoint.
pub trait ListQuery {
    /// Supplied filters as `(name, value)` pairs in declaration order.
    fn pairs(&self) -> Vec<(&'static str, String)>;

    /// `name=value&...`, or `None` when no filter is supplied.
    fn query_string(&self) -> Option<String> {
        encode_pairs(&self.pairs())
    }
}

/// A list query that can be resumed from an `older_than` cursor.
pub trait CursorQuery: ListQuery + Clone {
    fn with_older_than(&self, cursor: Option<String>) -> Self;
}

pub fn encode_pairs(pairs: &[(&'static str, String)]) -> Option<String> {
    if pairs.is_empty() {
        return None;
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    Some(serializer.finish())
}

/// Filters for `GET /v2/notifications`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationQuery {
    pub status: Option<String>,
    pub template_type: Option<TemplateType>,
    pub reference: Option<String>,
    pub older_than: Option<String>,
    /// Include notifications sent as part of a batch upload.
    pub include_jobs: bool,
}

impl NotificationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn template_type(mut self, template_type: TemplateType) -> Self {
        self.template_type = Some(template_type);
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn older_than(mut self, older_than: impl Into<String>) -> Self {
        self.older_than = Some(older_than.into());
        self
    }

    pub fn include_jobs(mut self, include_jobs: bool) -> Self {
        self.include_jobs = include_jobs;
        self
    }
}

impl ListQuery for NotificationQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(template_type) = self.template_type {
            pairs.push(("template_type", template_type.as_str().to_string()));
        }
        if let Some(reference) = &self.reference {
            pairs.push(("reference", reference.clone()));
        }
        if let Some(older_than) = &self.older_than {
            pairs.push(("older_than", older_than.clone()));
        }
        if self.include_jobs {
            pairs.push(("include_jobs", "true".to_string()));
        }
        pairs
    }
}

impl CursorQuery for NotificationQuery {
    fn with_older_than(&self, cursor: Option<String>) -> Self {
        Self {
            older_than: cursor,
            ..self.clone()
        }
    }
}

/// Filters for `GET /v2/received-text-messages`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceivedTextQuery {
    pub older_than: Option<String>,
}

impl ReceivedTextQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn older_than(mut self, older_than: impl Into<String>) -> Self {
        self.older_than = Some(older_than.into());
        self
    }
}

impl ListQuery for ReceivedTextQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        self.older_than
            .iter()
            .map(|older_than| ("older_than", older_than.clone()))
            .collect()
    }
}

impl CursorQuery for ReceivedTextQuery {
    fn with_older_than(&self, cursor: Option<String>) -> Self {
        Self { older_than: cursor }
    }
}

/// Filters for `GET /v2/templates`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateQuery {
    pub template_type: Option<TemplateType>,
}

impl ListQuery for TemplateQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        self.template_type
            .iter()
            .map(|template_type| ("type", template_type.as_str().to_string()))
            .collect()
    }
}
