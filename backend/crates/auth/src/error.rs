//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Several variants share one public message so a caller cannot tell an
//! unknown identifier from a wrong password or a locked account.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message for every credential failure
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
/// Message for a known account whose status is not active
pub const ACCOUNT_INACTIVE_MESSAGE: &str = "Account is inactive";
/// Message for every token failure
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown identifier or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account status is not active
    #[error("Account is inactive")]
    AccountInactive,

    /// Too many failed attempts; refused before the password is checked
    #[error("Account is locked until {until}")]
    AccountLocked { until: DateTime<Utc> },

    /// Bad signature, expired, unknown or inactive subject
    #[error("Invalid token")]
    TokenInvalid,

    /// No `Authorization: Bearer` header on a protected route
    #[error("Missing bearer token")]
    MissingBearerToken,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.to_app_error().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::AccountInactive
            | AuthError::AccountLocked { .. }
            | AuthError::TokenInvalid
            | AuthError::MissingBearerToken => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Message safe to send to the client
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials | AuthError::AccountLocked { .. } => {
                INVALID_CREDENTIALS_MESSAGE
            }
            AuthError::AccountInactive => ACCOUNT_INACTIVE_MESSAGE,
            AuthError::TokenInvalid | AuthError::MissingBearerToken => INVALID_TOKEN_MESSAGE,
            AuthError::Database(_) | AuthError::Internal(_) => "Internal server error",
        }
    }

    /// Whether the response should carry a `WWW-Authenticate` challenge
    pub fn is_token_error(&self) -> bool {
        matches!(self, AuthError::TokenInvalid | AuthError::MissingBearerToken)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            // Pool exhaustion and connection loss map to 503
            AuthError::Database(e) => AppError::from(e),
            _ => AppError::new(self.kind(), self.public_message()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::AccountLocked { until } => {
                tracing::warn!(locked_until = %until, "Login attempt on locked account");
            }
            AuthError::InvalidCredentials => {
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
        let challenge = self.is_token_error();
        let mut response = self.to_app_error().into_response();
        if challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Password verification task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failures_share_message() {
        let locked = AuthError::AccountLocked { until: Utc::now() };
        assert_eq!(
            locked.to_app_error().message(),
            AuthError::InvalidCredentials.to_app_error().message()
        );
        assert_eq!(locked.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_inactive_message() {
        let err = AuthError::AccountInactive;
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_app_error().message(), "Account is inactive");
    }

    #[test]
    fn test_token_errors_challenge() {
        let response = AuthError::TokenInvalid.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let response = AuthError::InvalidCredentials.into_response();
        assert!(!response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[test]
    fn test_database_errors() {
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::Protocol("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let err = AuthError::Internal("jwt key rejected".to_string());
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }
}
