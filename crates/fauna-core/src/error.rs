//! Error types module
//!
//! All errors that reach the HTTP boundary are unified under `AppError`. Each variant
//! describes how it should be presented through the `ErrorMetadata` trait, and upload
//! failures additionally carry a `FailureReason` so clients can tell validation,
//! transport, malformed-response and storage failures apart.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

use serde::Serialize;
use utoipa::ToSchema;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for upstream or partial failures
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Why an upload attempt failed, as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    Validation,
    Transport,
    MalformedResponse,
    Storage,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::Validation => "validation",
            FailureReason::Transport => "transport",
            FailureReason::MalformedResponse => "malformed-response",
            FailureReason::Storage => "storage",
        }
    }
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;

    /// Upload failure category, when the error ends an upload attempt
    fn failure_reason(&self) -> Option<FailureReason>;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Inference service unavailable: {0}")]
    InferenceUnavailable(String),

    #[error("Malformed inference response: {0}")]
    MalformedResponse(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level, failure_reason).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
    Option<FailureReason>,
) {
    match err {
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
            Some(FailureReason::Storage),
        ),
        AppError::Storage(_) => (
            502,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
            Some(FailureReason::Transport),
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
            Some(FailureReason::Validation),
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce the image size and try again"),
            false,
            LogLevel::Debug,
            Some(FailureReason::Validation),
        ),
        AppError::Unauthorized(_) => (
            401,
            "UNAUTHORIZED",
            false,
            Some("Sign in and retry with a valid bearer token"),
            false,
            LogLevel::Debug,
            None,
        ),
        AppError::InferenceUnavailable(_) => (
            502,
            "ANALYSIS_FAILED",
            true,
            Some("Retry the upload"),
            true,
            LogLevel::Warn,
            Some(FailureReason::Transport),
        ),
        AppError::MalformedResponse(_) => (
            502,
            "ANALYSIS_FAILED",
            true,
            Some("Retry the upload"),
            true,
            LogLevel::Warn,
            Some(FailureReason::MalformedResponse),
        ),
        AppError::Persistence(_) => (
            500,
            "PERSISTENCE_ERROR",
            true,
            Some("Retry the upload"),
            true,
            LogLevel::Error,
            Some(FailureReason::Storage),
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
            None,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
            None,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::InferenceUnavailable(_) => "InferenceUnavailable",
            AppError::MalformedResponse(_) => "MalformedResponse",
            AppError::Persistence(_) => "Persistence",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn failure_reason(&self) -> Option<FailureReason> {
        app_error_static_metadata(self).6
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to store image".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            // Transport and malformed replies look the same to the end user
            AppError::InferenceUnavailable(_) | AppError::MalformedResponse(_) => {
                "Failed to analyze image".to_string()
            }
            AppError::Persistence(_) => "Failed to save analysis".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_database() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Failed to access database");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
        assert_eq!(err.failure_reason(), Some(FailureReason::Storage));
    }

    #[test]
    fn test_transport_and_malformed_share_client_message() {
        let transport = AppError::InferenceUnavailable("connection refused".to_string());
        let malformed = AppError::MalformedResponse("expected value at line 1".to_string());
        assert_eq!(transport.client_message(), malformed.client_message());
        assert_eq!(transport.http_status_code(), 502);
        assert_eq!(transport.failure_reason(), Some(FailureReason::Transport));
        assert_eq!(
            malformed.failure_reason(),
            Some(FailureReason::MalformedResponse)
        );
    }

    #[test]
    fn test_blob_store_failure_is_transport() {
        let err = AppError::Storage("connection reset".to_string());
        assert_eq!(err.http_status_code(), 502);
        assert_eq!(err.failure_reason(), Some(FailureReason::Transport));
        assert_eq!(err.client_message(), "Failed to store image");
    }

    #[test]
    fn test_validation_errors_are_not_recoverable() {
        let err = AppError::PayloadTooLarge("2000000 bytes exceeds max".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert!(!err.is_recoverable());
        assert!(!err.is_sensitive());
        assert_eq!(err.failure_reason(), Some(FailureReason::Validation));

        let err = AppError::InvalidInput("bad mime".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_every_client_error_is_validation_or_auth() {
        let unauthorized = AppError::Unauthorized("no token".to_string());
        assert_eq!(unauthorized.http_status_code(), 401);
        assert_eq!(unauthorized.failure_reason(), None);
        assert_eq!(unauthorized.error_type(), "Unauthorized");

        for err in [
            AppError::InvalidInput("bad mime".to_string()),
            AppError::PayloadTooLarge("too big".to_string()),
        ] {
            assert!((400..500).contains(&err.http_status_code()));
            assert_eq!(err.failure_reason(), Some(FailureReason::Validation));
        }
    }

    #[test]
    fn test_failure_reason_wire_names() {
        assert_eq!(
            serde_json::to_value(FailureReason::MalformedResponse).unwrap(),
            "malformed-response"
        );
        assert_eq!(FailureReason::Storage.as_str(), "storage");
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(anyhow::anyhow!("root cause").context("outer"));
        let details = err.detailed_message();
        assert!(details.contains("Internal error with source"));
        assert!(details.contains("outer"));
    }
}
