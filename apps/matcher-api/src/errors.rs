use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant carries a human-readable cause; nothing is retried and no partial
/// result is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected upload (wrong extension, missing part, unreadable multipart body).
    #[error("Validation error: {0}")]
    Validation(String),

    /// PDF unreadable or yields no text.
    #[error("Text extraction failed: {0}")]
    Extraction(String),

    /// Generative service failed or returned JSON that does not fit the profile shape.
    #[error("Structured extraction failed: {0}")]
    StructuredExtraction(String),

    /// Report or JSON sidecar could not be written.
    #[error("Report generation failed: {0}")]
    Report(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Extraction(_) => "EXTRACTION_FAILED",
            AppError::StructuredExtraction(_) => "STRUCTURED_EXTRACTION_FAILED",
            AppError::Report(_) => "REPORT_FAILED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Validation(msg) => tracing::warn!("Rejected request: {msg}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            other => tracing::error!("{other}"),
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
