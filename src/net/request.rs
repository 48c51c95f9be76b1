//! Outbound request descriptor.
//!
//! DESIGN
//! ======
//! One value type carries everything a call site may shape (method, path,
//! query, JSON body, extra headers, auth requirement). The client adds the
//! bearer header and the transport adds cookies and the CSRF header, so
//! entity modules never assemble header maps by hand.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::error::RequestError;

/// Whether the client should attach the stored access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Attach `Authorization: Bearer <access>` when a token is stored, and
    /// run the refresh protocol on 401/403.
    #[default]
    Bearer,
    /// Send without a bearer header; auth failures are returned as-is.
    Anonymous,
}

/// A single REST call, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub auth: AuthMode,
}

impl RequestDescriptor {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            auth: AuthMode::Bearer,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append several query parameters in order.
    #[must_use]
    pub fn with_query_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    /// Set a raw JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` as the JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidRequest`] if `body` cannot be represented as JSON.
    pub fn with_json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, RequestError> {
        let value = serde_json::to_value(body).map_err(|e| RequestError::InvalidRequest(e.to_string()))?;
        Ok(self.with_body(value))
    }

    /// Append an extra header. Header validity is checked at dispatch.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Send without credentials and skip the refresh protocol.
    #[must_use]
    pub fn anonymous(mut self) -> Self {
        self.auth = AuthMode::Anonymous;
        self
    }
}
