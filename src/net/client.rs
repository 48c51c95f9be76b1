//! Authenticated request client with token refresh.
//!
//! ARCHITECTURE
//! ============
//! Every entity endpoint calls [`ApiClient::execute`]. Per call:
//!
//! 1. Read the access token from the credential store and dispatch.
//! 2. On 401/403 for a bearer call, read the refresh token.
//!    - none: clear the store, return `Unauthenticated`;
//!    - some: `POST /api/token/refresh/` through the transport directly
//!      (never back through `execute`).
//! 3. Refresh ok: store the new access token next to the unchanged refresh
//!    token and replay the original request once. The replay's result is
//!    final, whatever its status.
//! 4. Refresh failed: clear the store, return `Unauthenticated`.
//!
//! At most one refresh and one replay happen per call.
//!
//! CONCURRENCY
//! ===========
//! Under `RefreshPolicy::PerCall` each call that hits an expired token runs
//! its own refresh, so overlapping calls may refresh redundantly.
//! `RefreshPolicy::SingleFlight` serializes refreshes behind an async mutex;
//! a call that gets the gate after someone else already rotated the access
//! token skips its own refresh and replays with the fresh token.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::error::RequestError;
use super::request::{AuthMode, RequestDescriptor};
use super::transport::{ApiResponse, HttpTransport, Transport};
use crate::auth::credentials::{CredentialStore, Credentials, FileCredentialStore};
use crate::config::ClientConfig;

pub const REFRESH_PATH: &str = "/api/token/refresh/";

/// How overlapping refreshes are coordinated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Each failing call refreshes independently.
    #[default]
    PerCall,
    /// Refreshes are coalesced behind a shared gate.
    SingleFlight,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Shared handle to the backend; cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
    policy: RefreshPolicy,
    refresh_gate: Arc<Mutex<()>>,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { transport, credentials, policy: RefreshPolicy::default(), refresh_gate: Arc::new(Mutex::new(())) }
    }

    /// Build the production client: reqwest transport plus file-backed
    /// credentials rehydrated from `config.credentials_path`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidRequest`] if the HTTP transport cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, RequestError> {
        let transport = HttpTransport::new(&config.base_url, config.timeouts)?;
        let credentials = FileCredentialStore::load(&config.credentials_path);
        Ok(Self::new(Arc::new(transport), Arc::new(credentials)).with_refresh_policy(config.refresh_policy))
    }

    #[must_use]
    pub fn with_refresh_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn refresh_policy(&self) -> RefreshPolicy {
        self.policy
    }

    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Clear stored credentials.
    pub fn logout(&self) {
        self.credentials.clear();
        info!("credentials cleared");
    }

    /// Execute `request` with bearer auth and one refresh-and-replay on 401/403.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Network`] when no HTTP status was obtained;
    /// - [`RequestError::Unauthenticated`] when auth could not be recovered
    ///   (credentials have been cleared);
    /// - [`RequestError::Http`] for any other non-2xx response.
    #[tracing::instrument(level = "debug", skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<ApiResponse, RequestError> {
        let (sent_with, first) = self.dispatch(request).await?;
        if request.auth == AuthMode::Anonymous || !first.is_auth_failure() {
            debug!(status = first.status, "request complete");
            return into_result(first);
        }

        debug!(status = first.status, path = %request.path, "auth failure; attempting refresh");
        let Some(refresh_token) = self.credentials.refresh_token() else {
            warn!(status = first.status, path = %request.path, "no refresh token; logging out");
            self.credentials.clear();
            return Err(RequestError::Unauthenticated { status: first.status, body: first.body });
        };

        if let Err(reason) = self.refresh(&refresh_token, sent_with.as_deref()).await {
            warn!(%reason, path = %request.path, "token refresh failed; logging out");
            self.credentials.clear();
            return Err(RequestError::Unauthenticated { status: first.status, body: first.body });
        }

        let (_, replay) = self.dispatch(request).await?;
        debug!(status = replay.status, path = %request.path, "replayed after refresh");
        into_result(replay)
    }

    /// Execute and decode the JSON body as `T`.
    ///
    /// # Errors
    ///
    /// Everything [`ApiClient::execute`] returns, plus [`RequestError::Decode`].
    pub async fn fetch_json<T: DeserializeOwned>(&self, request: &RequestDescriptor) -> Result<T, RequestError> {
        self.execute(request).await?.json()
    }

    /// Send once, attaching whatever access token is stored right now.
    async fn dispatch(&self, request: &RequestDescriptor) -> Result<(Option<String>, ApiResponse), RequestError> {
        let bearer = match request.auth {
            AuthMode::Bearer => self.credentials.access_token(),
            AuthMode::Anonymous => None,
        };
        let response = self.transport.send(request, bearer.as_deref()).await?;
        Ok((bearer, response))
    }

    async fn refresh(&self, refresh_token: &str, stale_access: Option<&str>) -> Result<(), String> {
        match self.policy {
            RefreshPolicy::PerCall => self.refresh_now(refresh_token).await,
            RefreshPolicy::SingleFlight => {
                let _gate = self.refresh_gate.lock().await;
                match self.credentials.get() {
                    None => Err("logged out while waiting for refresh".to_owned()),
                    Some(current) if current.access.as_str() != stale_access.unwrap_or_default() => {
                        debug!("access token already rotated; skipping refresh");
                        Ok(())
                    }
                    Some(current) => self.refresh_now(&current.refresh).await,
                }
            }
        }
    }

    async fn refresh_now(&self, refresh_token: &str) -> Result<(), String> {
        let request = RequestDescriptor::post(REFRESH_PATH)
            .anonymous()
            .with_body(serde_json::json!({ "refresh": refresh_token }));
        let response = self
            .transport
            .send(&request, None)
            .await
            .map_err(|e| e.to_string())?;
        if !response.is_success() {
            return Err(format!("refresh returned status {}", response.status));
        }
        let payload: RefreshResponse =
            serde_json::from_str(&response.body).map_err(|e| format!("refresh response: {e}"))?;

        self.credentials
            .set(Credentials { access: payload.access, refresh: refresh_token.to_owned() });
        info!("access token refreshed");
        Ok(())
    }
}

fn into_result(response: ApiResponse) -> Result<ApiResponse, RequestError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(RequestError::Http { status: response.status, body: response.body })
    }
}
