//! Structured error types for the reelsense backend.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Main error type for the reelsense backend.
#[derive(Error, Debug)]
pub enum ReelError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse failed: {context}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Training failed: {message}")]
    Training { message: String },

    #[error("Lock poisoned: {resource}")]
    LockPoisoned { resource: String },

    #[error("Resource not ready: {resource}")]
    NotReady { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Type alias for Result with ReelError.
pub type ReelResult<T> = Result<T, ReelError>;

impl ReelError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    pub fn csv(context: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            context: context.into(),
            source,
        }
    }

    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn training(message: impl Into<String>) -> Self {
        Self::Training {
            message: message.into(),
        }
    }

    pub fn not_ready(resource: impl Into<String>) -> Self {
        Self::NotReady {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for ReelError {
    fn into_response(self) -> Response {
        let status = match self {
            ReelError::Config { .. }
            | ReelError::MissingColumn { .. }
            | ReelError::Validation { .. } => StatusCode::BAD_REQUEST,
            ReelError::NotReady { .. } => StatusCode::SERVICE_UNAVAILABLE,
            // Default to 500 for server-side failures
            ReelError::Io { .. }
            | ReelError::Csv { .. }
            | ReelError::Serialization { .. }
            | ReelError::Training { .. }
            | ReelError::LockPoisoned { .. }
            | ReelError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

/// Helper trait for safe RwLock read operations
pub trait SafeReadLock<T: ?Sized> {
    /// Safely acquire a read lock
    fn safe_read(&self) -> ReelResult<std::sync::RwLockReadGuard<'_, T>>;
}

impl<T: ?Sized> SafeReadLock<T> for std::sync::RwLock<T> {
    fn safe_read(&self) -> ReelResult<std::sync::RwLockReadGuard<'_, T>> {
        self.read().map_err(|_| ReelError::LockPoisoned {
            resource: "rwlock_read".to_string(),
        })
    }
}

/// Helper trait for safe RwLock write operations
pub trait SafeWriteLock<T: ?Sized> {
    /// Safely acquire a write lock
    fn safe_write(&self) -> ReelResult<std::sync::RwLockWriteGuard<'_, T>>;
}

impl<T: ?Sized> SafeWriteLock<T> for std::sync::RwLock<T> {
    fn safe_write(&self) -> ReelResult<std::sync::RwLockWriteGuard<'_, T>> {
        self.write().map_err(|_| ReelError::LockPoisoned {
            resource: "rwlock_write".to_string(),
        })
    }
}

/// Convert from csv errors
impl From<csv::Error> for ReelError {
    fn from(err: csv::Error) -> Self {
        ReelError::csv("csv_operation", err)
    }
}

/// Convert from serde_json errors
impl From<serde_json::Error> for ReelError {
    fn from(err: serde_json::Error) -> Self {
        ReelError::serialization("json_operation", err)
    }
}

/// Convert from std::io errors
impl From<std::io::Error> for ReelError {
    fn from(err: std::io::Error) -> Self {
        ReelError::io("io_operation", err)
    }
}
