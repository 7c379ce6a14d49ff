//! Remote catalog error types

use thiserror::Error;

/// Error returned by remote catalog calls
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the remote service
    #[error("remote catalog returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The supplied version token no longer matches the remote object
    #[error("version conflict: {0}")]
    VersionConflict(String),

    /// Response body could not be interpreted
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for remote catalog operations
pub type RemoteResult<T> = Result<T, RemoteError>;
