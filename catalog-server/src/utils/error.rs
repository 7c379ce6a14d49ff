//! Unified error handling
//!
//! [`AppError`] classifies every failure the product API can surface:
//!
//! | Variant    | Status | Meaning                                          |
//! |------------|--------|--------------------------------------------------|
//! | Validation | 400    | Malformed request; no I/O was attempted          |
//! | NotFound   | 404    | Id absent from the cache                         |
//! | Conflict   | 409    | Create on an id the cache already holds          |
//! | Remote     | 502    | The remote catalog call failed                   |
//! | Protocol   | 500    | Remote response violated the adapter contract    |
//! | Internal   | 500    | Anything else                                    |
//!
//! Remote and Protocol failures are indistinguishable to the caller (a
//! generic backend failure) but are logged in full for operators.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_client::RemoteError;
use serde::Serialize;
use tracing::error;

use crate::validation::response::ProtocolViolation;

/// API error envelope
///
/// ```json
/// {
///   "code": "E0003",
///   "message": "Resource not found: product P1"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    /// The remote catalog call failed at the transport level.
    #[error("Remote catalog error: {0}")]
    Remote(#[from] RemoteError),

    /// The remote response passed transport but broke an invariant.
    #[error("Protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),

            // Upstream failures: callers get a generic message, operators
            // get the full detail in the log.
            AppError::Remote(err) => {
                error!(target: "remote_catalog", error = %err, "Remote catalog call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "E9003",
                    "Remote catalog failure".to_string(),
                )
            }
            AppError::Protocol(violation) => {
                error!(target: "remote_catalog", error = %violation, "Remote catalog contract violation");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9004",
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

/// Result alias used by handlers and the coordinator.
pub type AppResult<T> = Result<T, AppError>;
