//! Wire transport for REST calls.
//!
//! ARCHITECTURE
//! ============
//! `Transport` is the seam between the auth-aware client and the network so
//! the refresh protocol can be exercised against a scripted fake. The real
//! implementation is `HttpTransport` over `reqwest` with a shared cookie jar:
//! every request carries the backend's cookies, and a `csrftoken` cookie is
//! echoed back as the `X-CSRFToken` header.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::RequestError;
use super::request::RequestDescriptor;
use crate::config::Timeouts;

const CSRF_COOKIE: &str = "csrftoken";
const CSRF_HEADER: &str = "X-CSRFToken";

/// Failures that happen before an HTTP status is available.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("request could not be built: {0}")]
    InvalidRequest(String),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 401 and 403 both trigger the refresh protocol.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED.as_u16() || self.status == StatusCode::FORBIDDEN.as_u16()
    }

    /// Deserialize the body. An empty body decodes as JSON `null`, so `()`
    /// and `Option<T>` targets accept `204 No Content`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        let raw = if self.body.trim().is_empty() { "null" } else { self.body.as_str() };
        serde_json::from_str(raw).map_err(|e| RequestError::Decode(e.to_string()))
    }
}

/// Sends one request and returns whatever status came back.
///
/// Implementations must not interpret status codes; auth handling lives in
/// [`crate::net::ApiClient`].
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestDescriptor, bearer: Option<&str>) -> Result<ApiResponse, TransportError>;
}

/// `reqwest`-backed transport rooted at a base URL.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    /// Parsed once; the cookie jar is keyed by URL.
    origin: Url,
    cookies: Arc<Jar>,
}

impl HttpTransport {
    /// Build a transport for `base_url` with the given timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the base URL is invalid or
    /// the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeouts: Timeouts) -> Result<Self, TransportError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let origin = Url::parse(&base_url)
            .map_err(|e| TransportError::ClientBuild(format!("invalid base URL {base_url}: {e}")))?;

        let cookies = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .cookie_provider(Arc::clone(&cookies))
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self { http, base_url, origin, cookies })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn csrf_token(&self) -> Option<String> {
        let header = self.cookies.cookies(&self.origin)?;
        csrf_from_cookie_header(header.to_str().ok()?)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor, bearer: Option<&str>) -> Result<ApiResponse, TransportError> {
        let url = join_url(&self.base_url, &request.path);
        debug!(method = %request.method, %url, authed = bearer.is_some(), "dispatch");

        let mut builder = self.http.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = self.csrf_token() {
            builder = builder.header(CSRF_HEADER, token);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                TransportError::InvalidRequest(e.to_string())
            } else {
                TransportError::Network(e.to_string())
            }
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!(status, bytes = body.len(), "response");
        Ok(ApiResponse { status, body })
    }
}

/// Join a base URL and a path with exactly one `/` between them.
fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Extract the CSRF token from a `Cookie` header value.
fn csrf_from_cookie_header(raw: &str) -> Option<String> {
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(CSRF_COOKIE)?.strip_prefix('='))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}
