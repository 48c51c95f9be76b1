//! Credential state and access-token claims.
//!
//! SYSTEM CONTEXT
//! ==============
//! `credentials` holds the process-wide token pair the request client reads
//! and rotates; `claims` reads the current user out of the access token.

pub mod claims;
pub mod credentials;

pub use claims::{AccessClaims, ClaimsError};
pub use credentials::{CredentialError, CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore};
