//! Login, registration, token verification, and logout.
//!
//! Login and register go out anonymously: a stale bearer must never ride
//! along, and an auth failure here is a wrong password, not an expired token,
//! so the refresh protocol is skipped and the status comes back as
//! `RequestError::Http`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::auth::credentials::Credentials;
use crate::net::{ApiClient, RequestDescriptor, RequestError};

pub const LOGIN_PATH: &str = "/api/token/";
pub const REGISTER_PATH: &str = "/api-auth/register/";
pub const VERIFY_PATH: &str = "/api/token/verify/";

/// Exchange username and password for a token pair and store it.
///
/// # Errors
///
/// [`RequestError::Http`] on rejected credentials, [`RequestError::Decode`]
/// if the response lacks either token, or a network error.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<(), RequestError> {
    let request = RequestDescriptor::post(LOGIN_PATH)
        .anonymous()
        .with_body(json!({ "username": username, "password": password }));
    let tokens: Credentials = client.fetch_json(&request).await?;
    client.credentials().set(tokens);
    info!(username, "logged in");
    Ok(())
}

/// Submit a registration form. Does not log in.
///
/// # Errors
///
/// Any [`RequestError`]; validation failures arrive as `Http { status: 400 }`
/// with the field errors in the body.
pub async fn register<F: Serialize + ?Sized>(client: &ApiClient, form: &F) -> Result<Value, RequestError> {
    let request = RequestDescriptor::post(REGISTER_PATH)
        .anonymous()
        .with_json(form)?;
    client.fetch_json(&request).await
}

/// Ask the backend whether the stored access token is still valid.
///
/// Returns `Ok(false)` when nothing is stored or the backend rejects the
/// token; other failures propagate.
///
/// # Errors
///
/// Network errors and non-auth HTTP failures.
pub async fn verify(client: &ApiClient) -> Result<bool, RequestError> {
    let Some(token) = client.credentials().access_token() else {
        return Ok(false);
    };
    let request = RequestDescriptor::post(VERIFY_PATH)
        .anonymous()
        .with_body(json!({ "token": token }));
    match client.execute(&request).await {
        Ok(_) => Ok(true),
        Err(RequestError::Http { status: 400 | 401, .. }) => Ok(false),
        Err(err) => Err(err),
    }
}

pub fn logout(client: &ApiClient) {
    client.logout();
}
