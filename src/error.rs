//! Error types for the Bookshelf server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Either a single message or one message per violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl std::fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorMessage::One(msg) => f.write_str(msg),
            ErrorMessage::Many(msgs) => f.write_str(&msgs.join(" ")),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// String, or array of strings for validation failures
    #[schema(value_type = Object)]
    pub message: ErrorMessage,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, ErrorMessage::Many(errors)),
            AppError::MissingParameter(msg) => (StatusCode::BAD_REQUEST, ErrorMessage::One(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorMessage::One(msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorMessage::One(msg)),
            // Internal faults surface as a generic client error
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorMessage::One("There was an error processing the request".to_string()),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
