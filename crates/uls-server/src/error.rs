// ABOUTME: Client-facing API errors and their HTTP status and JSON body mapping.
// ABOUTME: Storage failures become a generic 500; export write failures carry their message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use uls_store::{ExportError, StoreError};

pub const UNAUTHORIZED_MESSAGE: &str = "Invalid or missing API key";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing and unknown keys are indistinguishable to the client.
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,

    #[error("No logs to export")]
    NoLogs,

    #[error("Failed to save CSV: {0}")]
    ExportWrite(String),

    #[error("Failed to persist data")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NoLogs => StatusCode::BAD_REQUEST,
            ApiError::ExportWrite(_) | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::NoLogs => ApiError::NoLogs,
            ExportError::Io(io) => ApiError::ExportWrite(io.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage(e) => tracing::error!("persistence failure: {}", e),
            ApiError::ExportWrite(e) => tracing::error!("failed to write CSV export: {}", e),
            _ => {}
        }

        (
            self.status(),
            Json(serde_json::json!({ "status": "error", "message": self.to_string() })),
        )
            .into_response()
    }
}
