//! Error types for the import endpoints.

use thiserror::Error;

/// Errors from talking to the import backend.
///
/// `JobNotFound` is deliberately distinct from the generic API error:
/// the poller treats a vanished job differently from a failed request.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connection, timeout, TLS.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The polled job no longer exists on the backend.
    #[error("import job not found")]
    JobNotFound,

    /// The server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The server answered 2xx but the body was not the expected shape.
    #[error("unexpected response: {reason}")]
    UnexpectedResponse { reason: String },

    /// The column mapping could not be encoded for transport.
    #[error("failed to encode mapping: {0}")]
    MappingEncode(#[from] serde_json::Error),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
