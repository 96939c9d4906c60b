//! Unified API error handling.
//!
//! Every failure renders as an HTTP 200 response with the JSON envelope
//! `{success: false, message}`; clients inspect the `success` flag rather
//! than the status code. The [`ErrorCode`] taxonomy classifies failures
//! internally; raw database text never reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error classification for API failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Conflict,
    InvalidCredentials,
    AccountNotActive,
    Expired,
    Mismatch,
    NotFound,
    Unauthorized,
    Forbidden,
    Database,
}

impl ErrorCode {
    /// Get the string representation of the error code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Validation => "validation",
            ErrorCode::Conflict => "conflict",
            ErrorCode::InvalidCredentials => "invalid_credentials",
            ErrorCode::AccountNotActive => "account_not_active",
            ErrorCode::Expired => "expired",
            ErrorCode::Mismatch => "mismatch",
            ErrorCode::NotFound => "not_found",
            ErrorCode::Unauthorized => "unauthorized",
            ErrorCode::Forbidden => "forbidden",
            ErrorCode::Database => "database",
        }
    }
}

/// The failure envelope sent to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
}

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    // -------------------------------------------------------------------------
    // Convenience constructors for common error types
    // -------------------------------------------------------------------------

    /// Missing or malformed input - always user-correctable
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Duplicate resource, e.g. an already-registered phone number
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Unknown phone or wrong password
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredentials, message)
    }

    /// Account exists but is pending or suspended
    pub fn account_not_active(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AccountNotActive, message)
    }

    /// Verification code past its stored expiry
    pub fn expired(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Expired, message)
    }

    /// Wrong verification code
    pub fn mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Mismatch, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// No session, or the session is not marked logged in
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Authenticated but the role does not match
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Persistence failure; the message must stay generic
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Database, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The envelope is the external contract: failures still answer 200
        // and the client inspects `success`.
        (
            StatusCode::OK,
            Json(ErrorEnvelope {
                success: false,
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", err);

        match &err {
            sqlx::Error::RowNotFound => ApiError::not_found("Resource not found."),
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                if msg.contains("UNIQUE constraint failed") {
                    ApiError::conflict("A resource with this identifier already exists.")
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    ApiError::validation("Referenced resource does not exist.")
                } else {
                    ApiError::database("A database error occurred.")
                }
            }
            _ => ApiError::database("A database error occurred."),
        }
    }
}
