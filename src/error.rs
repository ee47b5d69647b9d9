//! Error types for the timer server
//!
//! The timer core itself is total. Errors only come from the server shell:
//! poisoned session locks and the generation service. Config files are read
//! at startup and fail through `anyhow` in `main`; malformed request bodies
//! are rejected by axum's `Json` extractor.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::services::GenerationError;

#[derive(Error, Debug)]
pub enum AppError {
    /// A thread panicked while holding a lock
    #[error("Failed to lock {0}")]
    Lock(&'static str),

    #[error("A code generation request is already in progress")]
    GenerationInProgress,

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::GenerationInProgress => StatusCode::CONFLICT,
            AppError::Generation(GenerationError::MissingApiKey) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
