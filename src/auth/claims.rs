//! Access-token payload decoding.
//!
//! The backend issues JWTs whose payload carries `user_id`, `exp` and `iat`.
//! The signature is not checked here; the payload is only used to label the
//! current session, and the server remains the authority on validity.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use super::credentials::CredentialStore;

#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("token is not a three-part JWT")]
    Malformed,

    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("token payload is not valid claims JSON: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Claims read from an access token payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessClaims {
    pub user_id: i64,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

impl AccessClaims {
    /// Whether the token has expired at `now` (seconds since the Unix epoch).
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Decode the payload segment of `token`.
///
/// # Errors
///
/// Returns [`ClaimsError`] when the token does not have three segments, the
/// payload is not base64url, or the JSON lacks `user_id`/`exp`.
pub fn decode_claims(token: &str) -> Result<AccessClaims, ClaimsError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ClaimsError::Malformed);
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Id of the user the stored access token belongs to.
///
/// Returns `None` when logged out or when the token cannot be decoded.
#[must_use]
pub fn current_user_id(store: &dyn CredentialStore) -> Option<i64> {
    let token = store.access_token()?;
    match decode_claims(&token) {
        Ok(claims) => Some(claims.user_id),
        Err(e) => {
            tracing::warn!(error = %e, "could not decode access token");
            None
        }
    }
}
