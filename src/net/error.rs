//! Request error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! `Unauthenticated` is returned exactly when the call cleared the credential
//! store, so callers can route to a login view without inspecting status
//! codes. Everything else leaves credentials alone.

use super::transport::TransportError;

/// Errors surfaced by [`crate::net::ApiClient`] and the entity endpoints.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The request never produced an HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// Authentication failed and could not be recovered; credentials were cleared.
    #[error("unauthenticated (status {status})")]
    Unauthenticated { status: u16, body: String },

    /// Non-success response from the original call or its replay.
    #[error("http error: status {status}")]
    Http { status: u16, body: String },

    /// A success response did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request could not be built (bad header, body, or URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl RequestError {
    /// HTTP status carried by the error, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthenticated { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Server-provided error body, for inline display by the caller.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated { body, .. } | Self::Http { body, .. } => Some(body),
            Self::Network(_) | Self::Decode(_) | Self::InvalidRequest(_) => None,
        }
    }
}

impl From<TransportError> for RequestError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(message) => Self::Network(message),
            TransportError::InvalidRequest(message) | TransportError::ClientBuild(message) => {
                Self::InvalidRequest(message)
            }
        }
    }
}
