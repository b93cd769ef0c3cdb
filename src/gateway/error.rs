//! Error types for the remote product gateway.

use thiserror::Error;

/// Errors that can occur when talking to the remote product API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Failed to reach the remote API at all.
    #[error("Connection failed: {source}")]
    Connection {
        #[source]
        source: reqwest::Error,
    },

    /// The remote API answered with a non-success status.
    #[error("Remote API returned status {status}")]
    Status { status: u16 },

    /// The remote API has no record for the requested id.
    #[error("Product '{id}' not found")]
    NotFound { id: String },

    /// The response body did not match the product schema.
    #[error("Failed to decode response: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
}

impl GatewayError {
    /// Error type string for logging and status text.
    pub fn error_type(&self) -> &'static str {
        match self {
            GatewayError::Connection { .. } => "connection_error",
            GatewayError::Status { .. } => "status_error",
            GatewayError::NotFound { .. } => "not_found",
            GatewayError::Decode { .. } => "decode_error",
        }
    }

    /// Whether this error means the record does not exist remotely,
    /// as opposed to a transport or shape failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound { .. })
    }
}
