//! Centralized error handling module
//!
//! Typed errors for the library; the CLI binary wraps them in anyhow at its
//! top level.

pub mod context;
pub mod types;

pub use context::ErrorContextExt;
pub use types::{ClientError, ClientResult};
