//! HTTP-facing error type.
//!
//! Translates core errors into status codes: validation and configuration
//! problems are the caller's to fix (400), everything else is a server or
//! upstream failure (500). Bodies are JSON `{"error": ...}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::core::stt::SttError;
use crate::core::tts::TtsError;

/// Result type for HTTP handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Tts(#[from] TtsError),

    #[error(transparent)]
    Stt(#[from] SttError),

    #[error("{0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Tts(TtsError::Validation(_) | TtsError::Configuration(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Stt(SttError::Validation(_) | SttError::Configuration(_)) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        } else {
            tracing::warn!("request rejected: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
