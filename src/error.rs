//! Common error types for the virtual wardrobe service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Shown when an uploaded file cannot be turned into an image record
pub const INGEST_FAILED_MESSAGE: &str = "Couldn't process the image. Please try another file.";

/// Shown when the safety filters of the model refuse to produce an image
pub const BLOCKED_MESSAGE: &str =
    "Image generation was blocked by the safety settings. Please try a different image.";

/// Shown when the model answers without any image part
pub const NO_IMAGE_MESSAGE: &str =
    "The AI did not create an image. The model may have returned text only.";

/// Shown when generation is triggered before every input is in place
pub const INCOMPLETE_STEPS_MESSAGE: &str =
    "Please complete all steps: upload your face photo, choose a garment and pick a background.";

/// Failure to turn a raw file into an image record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("Failed to read file: {0}")]
    ReadFailed(String),
}

impl IngestError {
    /// Message suitable for showing to the user
    pub fn user_message(&self) -> &'static str {
        INGEST_FAILED_MESSAGE
    }
}

/// Failure of a single generation attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{}", BLOCKED_MESSAGE)]
    Blocked,

    #[error("{}", NO_IMAGE_MESSAGE)]
    NoImageReturned,

    #[error("Gemini API error: {0}")]
    ServiceError(String),
}

impl GenerationError {
    /// Message stored in the failed session phase
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::ServiceError(_) => format!("Generation failed: {}", self),
            _ => self.to_string(),
        }
    }
}

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    pub code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, code) = match &self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None),
            AppError::Ingest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "ingest_error", Some("read_failed")),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error", None),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found_error", None),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None),
        };

        let message = match &self {
            AppError::Ingest(e) => e.user_message().to_string(),
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                message,
                r#type: error_type.to_string(),
                code: code.map(|c| c.to_string()),
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
