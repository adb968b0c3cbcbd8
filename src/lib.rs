//! Notifications API Client Library
//!
//! A blocking client for a notification-sending web API: send SMS, email and
//! letter notifications, check their status, work with templates and read
//! received text messages.

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod pagination;
pub mod payload;
pub mod query;
pub mod transport;
pub mod upload;

// Re-export commonly used types for convenience
pub use client::NotificationsClient;
pub use config::{ApiConfig, Config, ConfigManager};
pub use errors::{ClientError, ClientResult};
pub use payload::{
    EmailRequest, Field, LetterRequest, NotificationRequest, Personalisation,
    PersonalisationValue, PrecompiledLetterRequest, SmsRequest,
};
pub use query::{NotificationQuery, ReceivedTextQuery, TemplateType};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
pub use upload::Upload;
