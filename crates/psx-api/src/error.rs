//! API error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid parameter: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg.clone()),
            Self::NotImplemented(msg) => {
                (StatusCode::NOT_IMPLEMENTED, "Not Implemented", msg.clone())
            }
            // Internal detail stays in the logs, not in the response body.
            Self::Config(_) | Self::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An unexpected error occurred. Please try again later.".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error,
            "message": message,
        }));

        (status, body).into_response()
    }
}
