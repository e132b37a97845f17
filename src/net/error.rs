//! Errors produced by portal API calls.
//!
//! The store treats every variant the same way; the distinction exists so
//! the profile form and the CLI can print something useful.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

// =============================================================================
// SERVER ERROR ENVELOPE
// =============================================================================

/// Body of `{"error": {...}}` responses emitted by the admin API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ServerError {
    pub code: String,
    pub message: String,
    /// Per-field validation messages, when the server sends them.
    #[serde(default)]
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
}

#[allow(clippy::ref_option)]
fn server_suffix(server: &Option<ServerError>) -> String {
    server.as_ref().map(|s| format!(": {}", s.message)).unwrap_or_default()
}

#[derive(Deserialize)]
struct Envelope {
    error: ServerError,
}

/// Decode the server error envelope from a response body, if it has one.
#[must_use]
pub fn parse_server_error(body: &str) -> Option<ServerError> {
    serde_json::from_str::<Envelope>(body).ok().map(|e| e.error)
}

// =============================================================================
// API ERROR
// =============================================================================

/// Errors produced by [`crate::net::client::ApiClient`] and the
/// [`crate::net::api::PortalApi`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A request path could not be joined onto the API base URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}{}", server_suffix(.server))]
    Status { status: u16, body: String, server: Option<ServerError> },

    /// The response body could not be decoded.
    #[error("response parse failed: {0}")]
    Parse(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the failure came from one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for 401/403 answers, which mean "no usable session".
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// Build a [`ApiError::Status`] from a raw response body.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        let server = parse_server_error(&body);
        Self::Status { status, body, server }
    }
}
