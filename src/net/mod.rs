//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `request` describes a call, `transport` puts it on the wire, and `client`
//! wraps the transport with credentials and token refresh. `error` is the
//! taxonomy every entity endpoint returns.

pub mod client;
pub mod error;
pub mod request;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{ApiClient, RefreshPolicy};
pub use error::RequestError;
pub use request::{AuthMode, RequestDescriptor};
pub use transport::{ApiResponse, HttpTransport, Transport, TransportError};
