//! Error types for the notifications client
//!
//! Every fallible operation in the library returns [`ClientError`]. Upload read
//! failures keep the original `std::io::Error`; transport failures keep the
//! status and body the server sent back.

use std::path::PathBuf;
use thiserror::Error;

/// Main library error type
#[derive(Error, Debug)]
pub enum ClientError {
    // Upload errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Document is {size} bytes, larger than the {limit} byte limit")]
    DocumentTooLarge { size: usize, limit: usize },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("TOML parsing error: {context}")]
    TomlParsing {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid API base URL: {url}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Network and HTTP errors
    #[error("HTTP request failed: {method} {url}")]
    HttpRequest {
        method: String,
        url: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Network timeout for {url}")]
    NetworkTimeout { url: String },

    #[error("HTTP {status_code}: {body}")]
    HttpStatus { status_code: u16, body: String },

    // Serialization errors
    #[error("JSON serialization error: {context}")]
    JsonSerialization {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("JSON deserialization error: {context}")]
    JsonDeserialization {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Caller errors
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using ClientError
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Create a new Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Config error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Create a new JsonSerialization error with source
    pub fn json_serialization(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::JsonSerialization {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new JsonDeserialization error with source
    pub fn json_deserialization(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::JsonDeserialization {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether a caller could reasonably repeat the request.
    ///
    /// The client never retries on its own; this is advice for callers that do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkTimeout { .. } => true,
            Self::HttpRequest { .. } => true,
            Self::HttpStatus { status_code, .. } => {
                *status_code >= 500 || *status_code == 408 || *status_code == 429
            }
            _ => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) | Self::DocumentTooLarge { .. } => "upload",
            Self::Config { .. }
            | Self::ConfigNotFound { .. }
            | Self::TomlParsing { .. }
            | Self::InvalidBaseUrl { .. } => "config",
            Self::HttpRequest { .. } | Self::NetworkTimeout { .. } | Self::HttpStatus { .. } => {
                "network"
            }
            Self::JsonSerialization { .. } | Self::JsonDeserialization { .. } => "serialization",
            Self::InvalidArgument { .. } => "usage",
            Self::Other { .. } => "internal",
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() {
            Self::JsonDeserialization {
                context: format!(
                    "JSON syntax error at line {} column {}",
                    err.line(),
                    err.column()
                ),
                source: Some(Box::new(err)),
            }
        } else if err.is_data() {
            Self::JsonDeserialization {
                context: "JSON data error".to_string(),
                source: Some(Box::new(err)),
            }
        } else if err.is_eof() {
            Self::JsonDeserialization {
                context: "Unexpected end of JSON input".to_string(),
                source: Some(Box::new(err)),
            }
        } else {
            Self::JsonSerialization {
                context: "JSON serialization error".to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        Self::TomlParsing {
            context: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        if err.is_timeout() {
            Self::NetworkTimeout { url }
        } else if let Some(status) = err.status() {
            Self::HttpStatus {
                status_code: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            Self::HttpRequest {
                method: "UNKNOWN".to_string(),
                url,
                source: Some(Box::new(err)),
            }
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidBaseUrl {
            url: "URL".to_string(),
            source: Some(Box::new(err)),
        }
    }
}
