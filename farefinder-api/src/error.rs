use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error body shared by every endpoint. `code` always equals the HTTP status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// First violation reported by request validation.
    #[error("Request validation failed: {0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            AppError::Validation(_) => "Validation failed".to_string(),
            _ => status.canonical_reason().unwrap_or("Error").to_string(),
        };

        match &self {
            AppError::Internal(msg) => {
                tracing::error!("{}: {}", error, msg)
            }
            _ => tracing::debug!("Rejected request: {}", self),
        }

        let body = ErrorResponse {
            error,
            message: self.to_string(),
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}
