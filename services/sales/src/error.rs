//! Custom error types for the sales service
//!
//! `AppError` is the failure taxonomy presented at the service boundary.
//! Every storage- or codec-level failure is collapsed into one of these
//! variants before a response is written; underlying causes are logged and
//! never returned to the client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure taxonomy for the sales service
#[derive(Error, Debug)]
pub enum AppError {
    /// Lookup yielded nothing
    #[error("not found")]
    NotFound,

    /// Creation rejected, typically a duplicate identity
    #[error("not acceptable (maybe the username is not unique)")]
    NotAcceptable,

    /// Missing, malformed or invalid authorization
    #[error("{0}")]
    Unauthorized(String),

    /// Malformed request body
    #[error("{0}")]
    BadRequest(String),

    /// Anything else. Mapped to the distinctive teapot status so an
    /// unclassified failure is never confused with a designed outcome.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::NotAcceptable => (StatusCode::NOT_ACCEPTABLE, self.to_string()),
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Internal(detail) => {
                error!("unclassified failure: {}", detail);
                (StatusCode::IM_A_TEAPOT, "internal error".to_string())
            }
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Type alias for handler results
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_status_codes() {
        let cases = [
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (AppError::NotAcceptable, StatusCode::NOT_ACCEPTABLE),
            (
                AppError::Unauthorized("unauthorized".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::BadRequest("bad body".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Internal("boom".to_string()),
                StatusCode::IM_A_TEAPOT,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn internal_detail_is_not_part_of_the_message() {
        // The Display impl carries the detail for logging, but the wire
        // message written by into_response hides it.
        let err = AppError::Internal("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
