//! Error handling for the SHELF HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::response::{Envelope, ResponseStatus};

/// Result type alias for handler operations.
pub type ApiResult<T> = Result<T, AppError>;

/// Application error types that map to HTTP responses.
///
/// Client-side failures (`BadRequest`, `NotFound`) render as `status: fail`;
/// server-side failures render as `status: error`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("server error: {message}")]
    ServerError { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a server error with a caller-supplied message
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::ServerError {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body_status, message, internal) = match self {
            AppError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, ResponseStatus::Fail, message, false)
            }
            AppError::NotFound { message } => {
                (StatusCode::NOT_FOUND, ResponseStatus::Fail, message, false)
            }
            AppError::ServerError { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ResponseStatus::Error,
                message,
                false,
            ),
            AppError::Internal(source) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ResponseStatus::Error,
                source.to_string(),
                true,
            ),
        };

        if status.is_server_error() {
            let error_id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
            tracing::error!(
                error_id = %error_id,
                status_code = status.as_u16(),
                message = %message,
                "request failed"
            );
        } else {
            tracing::debug!(status_code = status.as_u16(), message = %message, "request rejected");
        }

        // Unexpected internals keep their detail out of release responses.
        let message = if internal && cfg!(not(debug_assertions)) {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let body = Envelope::status_message(body_status, message);
        (status, Json(body)).into_response()
    }
}
