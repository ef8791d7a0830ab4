//! Error types for the API layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types, mapped to HTTP status codes.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request (400): malformed body or failed validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error (500): the inference backend failed.
    #[error("Inference error: {0}")]
    InferenceFailure(String),

    /// Internal server error (500): anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::InferenceFailure(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "inference_failure", msg)
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
