//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::request::RequestDescriptor;
use super::transport::{ApiResponse, Transport, TransportError};

/// One recorded dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub method: reqwest::Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Replays queued responses in order and records every request.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    sent: Mutex<Vec<Sent>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<ApiResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self { responses: Mutex::new(responses.into()), sent: Mutex::new(Vec::new()) })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count_path(&self, path: &str) -> usize {
        self.sent().iter().filter(|s| s.path == path).count()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &RequestDescriptor, bearer: Option<&str>) -> Result<ApiResponse, TransportError> {
        self.sent.lock().unwrap().push(Sent {
            method: request.method.clone(),
            path: request.path.clone(),
            query: request.query.clone(),
            bearer: bearer.map(str::to_owned),
            body: request.body.clone(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(500, "script exhausted")))
    }
}

pub fn ok(body: &str) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::new(200, body))
}

pub fn status(code: u16) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::new(code, format!("{{\"detail\": \"status {code}\"}}")))
}
