//! HTTP transport behind the client.
//!
//! [`NotificationsClient`](crate::NotificationsClient) builds [`ApiRequest`]s
//! and hands them to a [`Transport`]. The shipped [`HttpTransport`] uses a
//! blocking reqwest client; tests substitute their own.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{AuthProvider, BearerToken, NoAuth};
use crate::config::{ApiConfig, DEFAULT_TIMEOUT_SECS};
use crate::errors::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request as the client sees it, before any transport details.
///
/// The path is held as unescaped segments; each one is percent-encoded on its
/// own when the URL is built, so `/`, `?` and `#` inside an ID stay inside
/// that segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            query: None,
            body: None,
        }
    }

    pub fn post<I, S>(segments: I, body: Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Post,
            segments: segments.into_iter().map(Into::into).collect(),
            query: None,
            body: Some(body),
        }
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    /// Escaped path, e.g. `/v2/template/a%2Fb`.
    pub fn path(&self) -> String {
        Url::parse("http://localhost/")
            .ok()
            .and_then(|mut url| {
                append_segments(&mut url, &self.segments).ok()?;
                Some(url.path().to_string())
            })
            .unwrap_or_default()
    }

    /// `path?query`, or just the path when there is no query.
    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path(), query),
            None => self.path(),
        }
    }
}

/// Percent-encode `segments` onto the end of `url`'s path.
fn append_segments(url: &mut Url, segments: &[String]) -> Result<(), ()> {
    url.path_segments_mut()?.pop_if_empty().extend(segments);
    Ok(())
}

/// A successful response: status plus the raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            ClientError::json_deserialization(
                format!("response body with status {} is not the expected JSON", self.status),
                e,
            )
        })
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }
}

/// Executes one request and waits for its response.
///
/// Implementations report network failures and non-2xx statuses as errors.
pub trait Transport {
    fn execute(&self, request: &ApiRequest) -> ClientResult<ApiResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        (**self).execute(request)
    }
}

/// Blocking reqwest transport rooted at a base URL.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    auth: Box<dyn AuthProvider>,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(config: &ApiConfig, auth: impl AuthProvider + 'static) -> ClientResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        let mut client_builder = Client::builder().timeout(timeout);
        if let Some(user_agent) = &config.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        }
        let client = client_builder
            .build()
            .map_err(|e| ClientError::config_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url,
            auth: Box::new(auth),
        })
    }

    /// Bearer auth when an API key is configured, none otherwise.
    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        match &config.api_key {
            Some(api_key) => Self::new(config, BearerToken::new(api_key.clone())),
            None => Self::new(config, NoAuth),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url_for(&self, request: &ApiRequest) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        append_segments(&mut url, &request.segments).map_err(|_| ClientError::InvalidBaseUrl {
            url: self.base_url.to_string(),
            source: None,
        })?;
        url.set_query(request.query.as_deref());
        Ok(url)
    }

    /// Build the reqwest request without sending it.
    pub fn build_request(&self, request: &ApiRequest) -> ClientResult<reqwest::blocking::Request> {
        let url = self.url_for(request)?;
        let mut headers = HeaderMap::new();
        for (name, value) in self.auth.headers()? {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::config_with_source("Invalid auth header name", e))?;
            let value = HeaderValue::from_str(&value)
                .map_err(|e| ClientError::config_with_source("Invalid auth header value", e))?;
            headers.insert(name, value);
        }

        let mut builder = match request.method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()),
        }
        .headers(headers);

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body).map_err(|e| {
                    ClientError::json_serialization("Failed to encode request body", e)
                })?);
        }

        builder.build().map_err(|e| ClientError::HttpRequest {
            method: request.method.to_string(),
            url: url.to_string(),
            source: Some(Box::new(e)),
        })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        self.send(request).map_err(|err| {
            warn!(
                method = %request.method,
                path = %request.path(),
                category = err.category(),
                retryable = err.is_retryable(),
                "request failed: {err}"
            );
            err
        })
    }
}

impl HttpTransport {
    fn send(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        let http_request = self.build_request(request)?;
        let url = http_request.url().to_string();
        debug!(method = %request.method, %url, "sending request");

        let response = self.client.execute(http_request).map_err(|e| {
            if e.is_timeout() {
                ClientError::NetworkTimeout { url: url.clone() }
            } else {
                ClientError::HttpRequest {
                    method: request.method.to_string(),
                    url: url.clone(),
                    source: Some(Box::new(e)),
                }
            }
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), %url, "received response");
        let body = response.bytes()?.to_vec();

        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                status_code: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Parse the base URL, making sure relative paths join beneath it.
fn parse_base_url(raw: &str) -> ClientResult<Url> {
    let mut url = Url::parse(raw).map_err(|e| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        source: Some(Box::new(e)),
    })?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl {
            url: raw.to_string(),
            source: None,
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
