//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input validation
    #[error("{0}")]
    MissingField(String),

    #[error("Invalid address label: {0}")]
    InvalidLabel(String),

    #[error("{0}")]
    Validation(String),

    // Authentication
    #[error("Authentication required.")]
    Unauthenticated,

    #[error("Token has expired.")]
    ExpiredToken,

    #[error("Invalid or expired token.")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("User not found")]
    UserNotFound,

    #[error("User with this email already exists")]
    DuplicateEmail,

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Coarse error taxonomy shared by every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    NotFound,
    Conflict,
    Internal,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Authentication required.")]
    pub message: String,
    #[schema(example = "UNAUTHENTICATED")]
    pub code: String,
}

impl AppError {
    /// Taxonomy bucket of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingField(_) | AppError::InvalidLabel(_) | AppError::Validation(_) => {
                ErrorKind::Validation
            }
            AppError::Unauthenticated
            | AppError::ExpiredToken
            | AppError::InvalidToken
            | AppError::InvalidCredentials => ErrorKind::Auth,
            AppError::UserNotFound => ErrorKind::NotFound,
            AppError::DuplicateEmail => ErrorKind::Conflict,
            AppError::Database(_) | AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingField(_) => "MISSING_FIELD",
            AppError::InvalidLabel(_) => "INVALID_LABEL",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::ExpiredToken => "TOKEN_EXPIRED",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::DuplicateEmail => "DUPLICATE_EMAIL",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            // The front end expects 400 for credential and duplicate-email failures
            AppError::MissingField(_)
            | AppError::InvalidLabel(_)
            | AppError::Validation(_)
            | AppError::InvalidCredentials
            | AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated | AppError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Server error, try again later".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Server error, try again later".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            message: self.user_message(),
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::ExpiredToken,
            _ => AppError::InvalidToken,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn missing_field(msg: impl Into<String>) -> Self {
        AppError::MissingField(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
