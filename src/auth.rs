//! Authentication headers for outgoing requests.

use std::fmt;

use crate::errors::ClientResult;

/// Supplies the headers that authenticate a request.
///
/// Called once per request so providers issuing short-lived tokens can mint a
/// fresh one each time.
pub trait AuthProvider: Send + Sync {
    fn headers(&self) -> ClientResult<Vec<(String, String)>>;
}

/// Sends a static API key as a bearer token.
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl AuthProvider for BearerToken {
    fn headers(&self) -> ClientResult<Vec<(String, String)>> {
        Ok(vec![(
            "Authorization".to_string(),
            format!("Bearer {}", self.token),
        )])
    }
}

/// Adds no headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl AuthProvider for NoAuth {
    fn headers(&self) -> ClientResult<Vec<(String, String)>> {
        Ok(Vec::new())
    }
}
