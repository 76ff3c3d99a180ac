//! Unified error handling for the OratorAI CLI and SDK
//!
//! This module provides:
//! - Unique error codes for debugging and documentation
//! - Structured error information with context
//! - Convenient constructor methods
//! - Automatic conversions from common error types

use std::fmt;
use thiserror::Error;

/// Unified Result type for all client operations
pub type Result<T> = std::result::Result<T, OratorError>;

/// Error codes for client operations
///
/// Each error has a unique code in the format `EXXX` where:
/// - E1XX: Authentication and authorization errors
/// - E2XX: Network and API errors
/// - E3XX: File and I/O errors
/// - E4XX: Configuration errors
/// - E5XX: Validation and input errors
/// - E6XX: Resource and domain errors
/// - E8XX: UI and interaction errors
/// - E9XX: Internal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Authentication (E1XX)
    /// E101: Authentication failed
    AuthenticationFailed,
    /// E102: Authorization denied
    AuthorizationDenied,
    /// E103: Session not found
    SessionNotFound,

    // Network (E2XX)
    /// E201: HTTP request failed
    HttpError,
    /// E202: Connection timeout
    ConnectionTimeout,
    /// E203: Connection refused
    ConnectionRefused,
    /// E204: API returned error response
    ApiError,
    /// E205: Invalid API response format
    InvalidResponse,
    /// E206: Duplicate in-flight request suppressed
    DuplicateRequest,

    // File/IO (E3XX)
    /// E301: File not found
    FileNotFound,
    /// E302: File read error
    FileReadError,
    /// E303: File write error
    FileWriteError,
    /// E304: File already exists
    FileAlreadyExists,

    // Configuration (E4XX)
    /// E401: Configuration error
    ConfigError,
    /// E402: Invalid endpoint URL
    InvalidEndpoint,

    // Validation (E5XX)
    /// E501: Invalid input
    InvalidInput,
    /// E502: Validation failed
    ValidationFailed,
    /// E503: Unsupported file type
    UnsupportedFileType,
    /// E504: File too large
    FileTooLarge,

    // Resource/domain (E6XX)
    /// E601: Resource not found
    ResourceNotFound,
    /// E603: Upload failed
    UploadFailed,
    /// E604: Group is at capacity
    GroupFull,
    /// E605: Submission not ready
    SubmissionNotReady,

    // UI (E8XX)
    /// E801: Dialog error
    DialogError,

    // Internal (E9XX)
    /// E901: Internal error
    InternalError,
    /// E902: Serialization error
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u16 {
        match self {
            // Authentication (E1XX)
            ErrorCode::AuthenticationFailed => 101,
            ErrorCode::AuthorizationDenied => 102,
            ErrorCode::SessionNotFound => 103,

            // Network (E2XX)
            ErrorCode::HttpError => 201,
            ErrorCode::ConnectionTimeout => 202,
            ErrorCode::ConnectionRefused => 203,
            ErrorCode::ApiError => 204,
            ErrorCode::InvalidResponse => 205,
            ErrorCode::DuplicateRequest => 206,

            // File/IO (E3XX)
            ErrorCode::FileNotFound => 301,
            ErrorCode::FileReadError => 302,
            ErrorCode::FileWriteError => 303,
            ErrorCode::FileAlreadyExists => 304,

            // Configuration (E4XX)
            ErrorCode::ConfigError => 401,
            ErrorCode::InvalidEndpoint => 402,

            // Validation (E5XX)
            ErrorCode::InvalidInput => 501,
            ErrorCode::ValidationFailed => 502,
            ErrorCode::UnsupportedFileType => 503,
            ErrorCode::FileTooLarge => 504,

            // Resource/domain (E6XX)
            ErrorCode::ResourceNotFound => 601,
            ErrorCode::UploadFailed => 603,
            ErrorCode::GroupFull => 604,
            ErrorCode::SubmissionNotReady => 605,

            // UI (E8XX)
            ErrorCode::DialogError => 801,

            // Internal (E9XX)
            ErrorCode::InternalError => 901,
            ErrorCode::SerializationError => 902,
        }
    }

    /// Get the string code (e.g., "E101")
    pub fn as_str(&self) -> String {
        format!("E{}", self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.code())
    }
}

/// Main error type for all client operations
#[derive(Error, Debug)]
pub enum OratorError {
    // ==================== Authentication Errors (E1XX) ====================
    /// Authentication failed
    #[error("[{code}] Authentication failed: {message}")]
    Authentication {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authorization denied
    #[error("[{code}] Authorization denied: {message}")]
    Authorization { code: ErrorCode, message: String },

    // ==================== Network Errors (E2XX) ====================
    /// HTTP/Network error
    #[error("[{code}] Network error: {message}")]
    Network {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// API error with status code
    #[error("[{code}] API error ({status}): {message}")]
    Api {
        code: ErrorCode,
        status: u16,
        message: String,
    },

    /// Duplicate concurrent request suppressed
    #[error("[{code}] Duplicate request in flight: {operation}")]
    DuplicateRequest { code: ErrorCode, operation: String },

    // ==================== File/IO Errors (E3XX) ====================
    /// File or IO error
    #[error("[{code}] {context}: {message}")]
    Io {
        code: ErrorCode,
        context: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    // ==================== Configuration Errors (E4XX) ====================
    /// Configuration error
    #[error("[{code}] Configuration error: {message}")]
    Config {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<config::ConfigError>,
    },

    // ==================== Validation Errors (E5XX) ====================
    /// Validation error
    #[error("[{code}] Validation error: {message}")]
    Validation {
        code: ErrorCode,
        message: String,
        field: Option<String>,
    },

    /// Invalid input error
    #[error("[{code}] Invalid input: {message}")]
    InvalidInput { code: ErrorCode, message: String },

    // ==================== Resource/Domain Errors (E6XX) ====================
    /// Resource not found
    #[error("[{code}] Not found: {resource}")]
    NotFound { code: ErrorCode, resource: String },

    /// Upload error
    #[error("[{code}] Upload failed: {message}")]
    Upload { code: ErrorCode, message: String },

    /// Group membership error
    #[error("[{code}] Group error: {message}")]
    Group { code: ErrorCode, message: String },

    /// Submission precondition error
    #[error("[{code}] {message}")]
    Submission { code: ErrorCode, message: String },

    // ==================== UI Errors (E8XX) ====================
    /// UI/Dialog error
    #[error("[{code}] UI error: {message}")]
    Ui { code: ErrorCode, message: String },

    // ==================== Internal Errors (E9XX) ====================
    /// Internal/Unexpected error
    #[error("[{code}] Internal error: {message}")]
    Internal { code: ErrorCode, message: String },

    /// JSON serialization error
    #[error("[{code}] Serialization error: {message}")]
    Serialization {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Timeout error
    #[error("[E202] Operation timed out")]
    Timeout,
}

// ==================== Constructor Methods ====================

impl OratorError {
    // --- Authentication ---

    /// Create authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            code: ErrorCode::AuthenticationFailed,
            message: message.into(),
            source: None,
        }
    }

    /// Create session-not-found error
    pub fn session_not_found(message: impl Into<String>) -> Self {
        Self::Authentication {
            code: ErrorCode::SessionNotFound,
            message: message.into(),
            source: None,
        }
    }

    /// Create authorization error
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            code: ErrorCode::AuthorizationDenied,
            message: message.into(),
        }
    }

    // --- Network ---

    /// Create network error from reqwest error
    pub fn network_from_reqwest(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::ConnectionTimeout
        } else if err.is_connect() {
            ErrorCode::ConnectionRefused
        } else {
            ErrorCode::HttpError
        };

        Self::Network {
            code,
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code: ErrorCode::ApiError,
            status,
            message: message.into(),
        }
    }

    /// Create invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::Api {
            code: ErrorCode::InvalidResponse,
            status: 0,
            message: message.into(),
        }
    }

    /// Create duplicate in-flight request error
    pub fn duplicate_request(operation: impl Into<String>) -> Self {
        Self::DuplicateRequest {
            code: ErrorCode::DuplicateRequest,
            operation: operation.into(),
        }
    }

    // --- File/IO ---

    /// Create IO error from std::io::Error
    pub fn io_from_error(context: impl Into<String>, err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::FileWriteError,
            std::io::ErrorKind::AlreadyExists => ErrorCode::FileAlreadyExists,
            _ => ErrorCode::FileReadError,
        };

        Self::Io {
            code,
            context: context.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::Io {
            code: ErrorCode::FileNotFound,
            context: "File not found".to_string(),
            message: path.into(),
            source: None,
        }
    }

    // --- Configuration ---

    /// Create configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::ConfigError,
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration error with source
    pub fn config_from_error(err: config::ConfigError) -> Self {
        Self::Config {
            code: ErrorCode::ConfigError,
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create invalid endpoint error
    pub fn invalid_endpoint(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::InvalidEndpoint,
            message: message.into(),
            source: None,
        }
    }

    // --- Validation ---

    /// Create validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            field: None,
        }
    }

    /// Create validation error with field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create unsupported file type error
    pub fn unsupported_file_type(message: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::UnsupportedFileType,
            message: message.into(),
            field: None,
        }
    }

    /// Create file too large error
    pub fn file_too_large(message: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::FileTooLarge,
            message: message.into(),
            field: None,
        }
    }

    /// Create invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            code: ErrorCode::InvalidInput,
            message: message.into(),
        }
    }

    // --- Resource/Domain ---

    /// Create not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            code: ErrorCode::ResourceNotFound,
            resource: resource.into(),
        }
    }

    /// Create upload error
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            code: ErrorCode::UploadFailed,
            message: message.into(),
        }
    }

    /// Create group-at-capacity error
    pub fn group_full(message: impl Into<String>) -> Self {
        Self::Group {
            code: ErrorCode::GroupFull,
            message: message.into(),
        }
    }

    /// Create submission precondition error
    pub fn submission_not_ready(message: impl Into<String>) -> Self {
        Self::Submission {
            code: ErrorCode::SubmissionNotReady,
            message: message.into(),
        }
    }

    // --- Internal ---

    /// Create internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::InternalError,
            message: message.into(),
        }
    }

    /// Create serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            code: ErrorCode::SerializationError,
            message: message.into(),
            source: None,
        }
    }

    // --- Utility Methods ---

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Authentication { code, .. } => *code,
            Self::Authorization { code, .. } => *code,
            Self::Network { code, .. } => *code,
            Self::Api { code, .. } => *code,
            Self::DuplicateRequest { code, .. } => *code,
            Self::Io { code, .. } => *code,
            Self::Config { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            Self::InvalidInput { code, .. } => *code,
            Self::NotFound { code, .. } => *code,
            Self::Upload { code, .. } => *code,
            Self::Group { code, .. } => *code,
            Self::Submission { code, .. } => *code,
            Self::Ui { code, .. } => *code,
            Self::Internal { code, .. } => *code,
            Self::Serialization { code, .. } => *code,
            Self::Timeout => ErrorCode::ConnectionTimeout,
        }
    }

    /// Check if this is an authentication error
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::Authorization { .. }
        )
    }

    /// Check if this is a network error
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Api { .. } | Self::Timeout)
    }

    /// Check if this is a retryable error
    ///
    /// Nothing in this crate retries automatically; callers may.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. }
                | Self::Timeout
                | Self::Api { status: 503, .. }
                | Self::Api { status: 429, .. }
        )
    }

    /// The human-readable message without the code prefix, for toast-style
    /// display.
    pub fn display_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidInput { message, .. } => message.clone(),
            Self::Submission { message, .. } => message.clone(),
            Self::Group { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ==================== From Implementations ====================

impl From<std::io::Error> for OratorError {
    fn from(err: std::io::Error) -> Self {
        Self::io_from_error("IO operation", err)
    }
}

impl From<reqwest::Error> for OratorError {
    fn from(err: reqwest::Error) -> Self {
        Self::network_from_reqwest(err)
    }
}

impl From<serde_json::Error> for OratorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            code: ErrorCode::SerializationError,
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<config::ConfigError> for OratorError {
    fn from(err: config::ConfigError) -> Self {
        Self::config_from_error(err)
    }
}

impl From<dialoguer::Error> for OratorError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Ui {
            code: ErrorCode::DialogError,
            message: format!("Dialog error: {}", err),
        }
    }
}

// Manual Clone implementation that drops non-cloneable sources
impl Clone for OratorError {
    fn clone(&self) -> Self {
        match self {
            Self::Authentication {
                code,
                message,
                source: _,
            } => Self::Authentication {
                code: *code,
                message: message.clone(),
                source: None,
            },
            Self::Authorization { code, message } => Self::Authorization {
                code: *code,
                message: message.clone(),
            },
            Self::Network {
                code,
                message,
                source: _,
            } => Self::Network {
                code: *code,
                message: message.clone(),
                source: None,
            },
            Self::Api {
                code,
                status,
                message,
            } => Self::Api {
                code: *code,
                status: *status,
                message: message.clone(),
            },
            Self::DuplicateRequest { code, operation } => Self::DuplicateRequest {
                code: *code,
                operation: operation.clone(),
            },
            Self::Io {
                code,
                context,
                message,
                source: _,
            } => Self::Io {
                code: *code,
                context: context.clone(),
                message: message.clone(),
                source: None,
            },
            Self::Config {
                code,
                message,
                source: _,
            } => Self::Config {
                code: *code,
                message: message.clone(),
                source: None,
            },
            Self::Validation {
                code,
                message,
                field,
            } => Self::Validation {
                code: *code,
                message: message.clone(),
                field: field.clone(),
            },
            Self::InvalidInput { code, message } => Self::InvalidInput {
                code: *code,
                message: message.clone(),
            },
            Self::NotFound { code, resource } => Self::NotFound {
                code: *code,
                resource: resource.clone(),
            },
            Self::Upload { code, message } => Self::Upload {
                code: *code,
                message: message.clone(),
            },
            Self::Group { code, message } => Self::Group {
                code: *code,
                message: message.clone(),
            },
            Self::Submission { code, message } => Self::Submission {
                code: *code,
                message: message.clone(),
            },
            Self::Ui { code, message } => Self::Ui {
                code: *code,
                message: message.clone(),
            },
            Self::Internal { code, message } => Self::Internal {
                code: *code,
                message: message.clone(),
            },
            Self::Serialization {
                code,
                message,
                source: _,
            } => Self::Serialization {
                code: *code,
                message: message.clone(),
                source: None,
            },
            Self::Timeout => Self::Timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::AuthenticationFailed.code(), 101);
        assert_eq!(ErrorCode::HttpError.code(), 201);
        assert_eq!(ErrorCode::FileNotFound.code(), 301);
        assert_eq!(ErrorCode::ConfigError.code(), 401);
        assert_eq!(ErrorCode::GroupFull.code(), 604);
    }

    #[test]
    fn test_error_code_string() {
        assert_eq!(ErrorCode::AuthenticationFailed.as_str(), "E101");
        assert_eq!(ErrorCode::DuplicateRequest.as_str(), "E206");
    }

    #[test]
    fn test_error_display() {
        let err = OratorError::authentication("Invalid credentials");
        assert!(err.to_string().contains("E101"));
        assert!(err.to_string().contains("Invalid credentials"));
    }

    #[test]
    fn test_error_is_retryable() {
        let timeout = OratorError::Timeout;
        assert!(timeout.is_retryable());

        let auth_err = OratorError::authentication("Failed");
        assert!(!auth_err.is_retryable());

        let throttled = OratorError::api(429, "Too many requests");
        assert!(throttled.is_retryable());
    }

    #[test]
    fn test_display_message_strips_code() {
        let err = OratorError::submission_not_ready(
            "Please confirm both slide and media before submitting",
        );
        assert_eq!(
            err.display_message(),
            "Please confirm both slide and media before submitting"
        );
    }
}
