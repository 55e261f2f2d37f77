//! Auth Error Types
//!
//! Every failure the gateway can produce. Variants classify through
//! `kernel::error::kind::ErrorKind`, which owns the HTTP status mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// `Authorization` header absent or not using the `Basic ` scheme
    #[error("missing or malformed authorization header")]
    MissingOrMalformedHeader,

    /// Basic token is not base64, or does not decode to UTF-8 text
    #[error("invalid credential encoding")]
    InvalidEncoding,

    /// Decoded credentials lack a `:` separator or one side is empty
    #[error("malformed credentials")]
    MalformedCredentials,

    #[error("no user found for this email")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    /// Session cookie missing or not bound to a live session
    #[error("Not found")]
    NoSession,

    #[error("Not found")]
    NotFound,

    /// User directory or session store could not be reached
    #[error("user directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("email missing")]
    EmailMissing,

    #[error("password missing")]
    PasswordMissing,

    #[error("Unauthorized")]
    Unauthorized,

    /// Invalid process configuration
    #[error("configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingOrMalformedHeader
            | AuthError::InvalidEncoding
            | AuthError::MalformedCredentials
            | AuthError::WrongPassword
            | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::UserNotFound | AuthError::NoSession | AuthError::NotFound => {
                ErrorKind::NotFound
            }
            AuthError::EmailMissing | AuthError::PasswordMissing => ErrorKind::BadRequest,
            AuthError::DirectoryUnavailable(_) => ErrorKind::ServiceUnavailable,
            AuthError::Config(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Message safe to show to the client
    ///
    /// Server-side details stay in the logs.
    fn public_message(&self) -> String {
        if self.kind().is_server_error() {
            self.kind().as_str().to_string()
        } else {
            self.to_string()
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::DirectoryUnavailable(e) => {
                tracing::error!(error = %e, "User directory unavailable");
            }
            AuthError::Config(msg) | AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::WrongPassword => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let body = serde_json::json!({ "error": self.public_message() });
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::DirectoryUnavailable(err.to_string())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::Empty => AuthError::PasswordMissing,
            other => AuthError::Internal(other.to_string()),
        }
    }
}
