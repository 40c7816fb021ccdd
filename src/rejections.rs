use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::pipeline::InputError;
use crate::services::GenerationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Input(&'static str),
    #[error(transparent)]
    InvalidRequest(#[from] InputError),
    #[error("questions failed validation: {0}")]
    InvalidQuestions(String),
    #[error("quiz not found")]
    NotFound,
    #[error("not allowed to modify this quiz")]
    Forbidden,
    #[error("{0}")]
    Internal(&'static str),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

const GENERATION_FAILED: &str = "Failed to generate quiz. Please try again.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Input(_) | AppError::InvalidRequest(_) | AppError::InvalidQuestions(_) => {
                (StatusCode::BAD_REQUEST, "INPUT_ERROR")
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
            AppError::Generation(_) => (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED),
        };

        let body = ErrorBody {
            error: error.to_string(),
            details: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Log an error and turn it into an [`AppError`] with a fixed public message.
pub trait ResultExt<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError>;
    fn reject_input(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Internal(message)
        })
    }

    fn reject_input(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{message}: {e}");
            AppError::Input(message)
        })
    }
}
