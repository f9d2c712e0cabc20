use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[derive(Serialize)]
struct ErrBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, msg) = match &self {
            AppError::BadRequest(s) => (StatusCode::BAD_REQUEST, s),
            AppError::NotFound(s) => (StatusCode::NOT_FOUND, s),
            AppError::ServiceUnavailable(s) => (StatusCode::SERVICE_UNAVAILABLE, s),
            AppError::Internal(s) => (StatusCode::INTERNAL_SERVER_ERROR, s),
        };
        (code, Json(ErrBody { error: msg.clone() })).into_response()
    }
}

// Conversion from String to AppError
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Internal(s)
    }
}

// Conversion from existing ReelError to AppError
impl From<crate::errors::ReelError> for AppError {
    fn from(err: crate::errors::ReelError) -> Self {
        use crate::errors::ReelError;
        match err {
            ReelError::Config { message } => AppError::BadRequest(message),
            ReelError::MissingColumn { column } => {
                AppError::BadRequest(format!("Missing required column: {column}"))
            }
            ReelError::Validation { field, message } => {
                AppError::BadRequest(format!("Validation error for {field}: {message}"))
            }
            ReelError::NotReady { resource } => {
                AppError::ServiceUnavailable(format!("{resource} is not available"))
            }
            ReelError::Io { operation, source } => {
                AppError::Internal(format!("I/O {operation} failed: {source}"))
            }
            ReelError::Csv { context, source } => {
                AppError::Internal(format!("CSV {context} failed: {source}"))
            }
            ReelError::Serialization { context, source } => {
                AppError::Internal(format!("Serialization {context} failed: {source}"))
            }
            ReelError::Training { message } => {
                AppError::Internal(format!("Training failed: {message}"))
            }
            ReelError::LockPoisoned { resource } => {
                AppError::Internal(format!("Lock for {resource} poisoned"))
            }
            ReelError::Internal { message } => AppError::Internal(message),
        }
    }
}
