//! Error handling for Gatherly
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Main error type for the Gatherly application
#[derive(Error, Debug)]
pub enum GatherlyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Profile not found: {profile_id}")]
    ProfileNotFound { profile_id: Uuid },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Please wait {retry_after_seconds} seconds before trying again")]
    RateLimitExceeded { retry_after_seconds: u64 },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Object storage specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Could not read image: {0}")]
    InvalidImage(String),

    #[error("Image encoding failed: {0}")]
    EncodeFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid object URL: {0}")]
    InvalidObjectUrl(String),
}

/// Result type alias for Gatherly operations
pub type Result<T> = std::result::Result<T, GatherlyError>;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

impl GatherlyError {
    /// HTTP status code for the error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatherlyError::Validation(_) => StatusCode::BAD_REQUEST,
            GatherlyError::Authentication(_) | GatherlyError::Token(_) => StatusCode::UNAUTHORIZED,
            GatherlyError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            GatherlyError::ProfileNotFound { .. } | GatherlyError::EventNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            GatherlyError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatherlyError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            GatherlyError::Database(_) | GatherlyError::Migration(_) => "DATABASE_ERROR",
            GatherlyError::Redis(_) => "CACHE_ERROR",
            GatherlyError::Http(_) => "UPSTREAM_ERROR",
            GatherlyError::Serialization(_) => "SERIALIZATION_ERROR",
            GatherlyError::Io(_) => "IO_ERROR",
            GatherlyError::UrlParse(_) => "URL_ERROR",
            GatherlyError::Storage(_) => "STORAGE_ERROR",
            GatherlyError::Token(_) => "INVALID_TOKEN",
            GatherlyError::PasswordHash(_) => "CREDENTIAL_ERROR",
            GatherlyError::Config(_) => "CONFIG_ERROR",
            GatherlyError::Validation(_) => "VALIDATION_ERROR",
            GatherlyError::Authentication(_) => "AUTH_ERROR",
            GatherlyError::PermissionDenied(_) => "FORBIDDEN",
            GatherlyError::ProfileNotFound { .. } | GatherlyError::EventNotFound { .. } => {
                "NOT_FOUND"
            }
            GatherlyError::RateLimitExceeded { .. } => "RATE_LIMITED",
            GatherlyError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GatherlyError::Database(_) | GatherlyError::Migration(_) | GatherlyError::Config(_) => {
                ErrorSeverity::Critical
            }
            GatherlyError::PermissionDenied(_)
            | GatherlyError::Authentication(_)
            | GatherlyError::Token(_)
            | GatherlyError::RateLimitExceeded { .. } => ErrorSeverity::Warning,
            GatherlyError::Validation(_)
            | GatherlyError::ProfileNotFound { .. }
            | GatherlyError::EventNotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Message safe to surface to API clients.
    ///
    /// Validation, auth and rate-limit messages are surfaced verbatim;
    /// infrastructure failures are collapsed to a generic message.
    fn public_message(&self) -> String {
        match self {
            GatherlyError::Database(_) | GatherlyError::Migration(_) => {
                "A database error occurred".to_string()
            }
            GatherlyError::Redis(_) => "A cache error occurred".to_string(),
            GatherlyError::Serialization(_) | GatherlyError::Io(_) => {
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for GatherlyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                tracing::error!(error = %self, code = code, "Request failed");
            }
            ErrorSeverity::Warning => {
                tracing::warn!(error = %self, code = code, "Request rejected");
            }
            ErrorSeverity::Info => {
                tracing::debug!(error = %self, code = code, "Request rejected");
            }
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.public_message(),
            }
        }));

        (status, body).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = GatherlyError::Validation("End time must be after start time".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = GatherlyError::RateLimitExceeded {
            retry_after_seconds: 60,
        };
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let err = GatherlyError::EventNotFound {
            event_id: Uuid::nil(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rate_limit_message_carries_cooldown() {
        let err = GatherlyError::RateLimitExceeded {
            retry_after_seconds: 42,
        };
        assert_eq!(err.to_string(), "Please wait 42 seconds before trying again");
    }

    #[test]
    fn test_database_errors_are_not_leaked() {
        let err = GatherlyError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.public_message(), "A database error occurred");
    }
}
