//! Application error types
//!
//! Unified error handling for the entire application.

use matchday_core::DomainError;
use serde::Serialize;
use std::fmt;

use crate::auth::TokenError;
use crate::messages::{EnglishCatalog, MessageCatalog};

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Missing authentication")]
    MissingAuth,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Account not verified, retry in {remaining_time}s")]
    AccountNotVerified { remaining_time: u64 },

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("CSRF token mismatch")]
    CsrfMismatch,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Rate limiting
    #[error("Rate limit exceeded, retry in {retry_after}s")]
    RateLimitExceeded { retry_after: u64 },

    #[error("Client IP could not be determined")]
    ClientIpUnknown,

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Redis errors
    #[error("Cache error: {0}")]
    Cache(String),

    // External service errors
    #[error("External service error: {0}")]
    ExternalService(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) | Self::InvalidInput(_) | Self::ClientIpUnknown => 400,

            // 401 Unauthorized
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::MissingAuth
            | Self::InvalidRefreshToken => 401,

            // 403 Forbidden
            Self::InsufficientPermissions | Self::AccountNotVerified { .. } | Self::CsrfMismatch => {
                403
            }

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 409 Conflict
            Self::Conflict(_) => 409,

            // 429 Too Many Requests
            Self::RateLimitExceeded { .. } => 429,

            // 502 Bad Gateway
            Self::ExternalService(_) => 502,

            // 500 Internal Server Error
            Self::Database(_) | Self::Cache(_) | Self::Internal(_) | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::AccountNotVerified { .. } => "ACCOUNT_NOT_VERIFIED",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::CsrfMismatch => "CSRF_MISMATCH",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::ClientIpUnknown => "CLIENT_IP_UNKNOWN",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Structured detail that is safe to show the client
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::AccountNotVerified { remaining_time } => {
                Some(serde_json::json!({ "remainingTime": remaining_time }))
            }
            Self::RateLimitExceeded { retry_after } => {
                Some(serde_json::json!({ "retryAfter": retry_after }))
            }
            Self::Validation(msg) | Self::InvalidInput(msg) => {
                Some(serde_json::json!({ "reason": msg }))
            }
            _ => None,
        }
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        let status = self.status_code();
        (500..600).contains(&status)
    }

    /// Check if this error means "not authenticated"
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == 401
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::TokenExpired => Self::TokenExpired,
            TokenError::Encoding => Self::Internal(anyhow::anyhow!("token encoding failed")),
            TokenError::InvalidSignature
            | TokenError::FingerprintMismatch
            | TokenError::Malformed
            | TokenError::WrongTokenType => Self::InvalidToken,
        }
    }
}

/// Error body returned to clients.
///
/// `message` always comes from the message catalog so that the internal
/// `Display` text of store errors never leaves the process.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Build the body using a specific catalog
    pub fn with_catalog(err: &AppError, catalog: &dyn MessageCatalog) -> Self {
        let code = err.error_code();
        Self {
            success: false,
            code: code.to_string(),
            message: catalog.message(code).to_string(),
            data: err.details(),
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self::with_catalog(err, &EnglishCatalog)
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
