//! Common test utilities and helpers
//!
//! A scripted in-memory transport for client tests and a command builder for
//! CLI tests.

#![allow(dead_code)]

use assert_cmd::Command;
use notifications_client::{ApiRequest, ApiResponse, ClientError, ClientResult, Transport};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use tempfile::TempDir;

/// Transport that records every request and replays queued responses.
///
/// Running out of responses is reported as an error so a test that makes an
/// unexpected call fails loudly.
#[derive(Default)]
pub struct MockTransport {
    requests: RefCell<Vec<ApiRequest>>,
    responses: RefCell<VecDeque<ClientResult<ApiResponse>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with a JSON body.
    pub fn respond_json(self, body: Value) -> Self {
        self.responses.borrow_mut().push_back(Ok(ApiResponse {
            status: 200,
            body: serde_json::to_vec(&body).unwrap(),
        }));
        self
    }

    /// Queue a 200 response with raw bytes.
    pub fn respond_bytes(self, body: &[u8]) -> Self {
        self.responses.borrow_mut().push_back(Ok(ApiResponse {
            status: 200,
            body: body.to_vec(),
        }));
        self
    }

    /// Queue a non-2xx status error.
    pub fn respond_status(self, status_code: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ClientError::HttpStatus {
                status_code,
                body: body.to_string(),
            }));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// The single request made so far.
    pub fn only_request(&self) -> ApiRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::config("no scripted response left")))
    }
}

/// A page of notifications with the given ids and optional next link.
pub fn notifications_page(ids: &[&str], next: Option<&str>) -> Value {
    let notifications: Vec<Value> = ids
        .iter()
        .map(|id| serde_json::json!({"id": id, "type": "sms", "status": "delivered"}))
        .collect();
    let mut links = serde_json::json!({"current": "/v2/notifications"});
    if let Some(next) = next {
        links["next"] = Value::String(next.to_string());
    }
    serde_json::json!({"notifications": notifications, "links": links})
}

/// A page of received texts with the given ids and optional next link.
pub fn received_texts_page(ids: &[&str], next: Option<&str>) -> Value {
    let messages: Vec<Value> = ids
        .iter()
        .map(|id| serde_json::json!({"id": id, "content": "hello", "user_number": "447700900000"}))
        .collect();
    let mut links = serde_json::json!({"current": "/v2/received-text-messages"});
    if let Some(next) = next {
        links["next"] = Value::String(next.to_string());
    }
    serde_json::json!({"received_text_messages": messages, "links": links})
}

/// Command for the `notifications` binary with an isolated home directory.
pub struct TestCommand {
    cmd: Command,
    home: TempDir,
}

impl TestCommand {
    pub fn new() -> Self {
        let home = TempDir::new().unwrap();
        let mut cmd = Command::cargo_bin("notifications").unwrap();
        cmd.env("HOME", home.path())
            .env_remove("NOTIFICATIONS_API_KEY")
            .env_remove("RUST_LOG");
        Self { cmd, home }
    }

    pub fn home(&self) -> &std::path::Path {
        self.home.path()
    }

    pub fn command(&mut self) -> &mut Command {
        &mut self.cmd
    }
}
