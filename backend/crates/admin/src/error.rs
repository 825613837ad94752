//! Admin Error Types
//!
//! Admin-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Every message here is client-facing
//! except for `Database` and `Internal`, which render as a generic 500.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

/// Admin-specific result type alias
pub type AdminResult<T> = Result<T, AdminError>;

/// Admin-specific error variants
#[derive(Debug, Error)]
pub enum AdminError {
    /// Email or password absent from the body
    #[error("Missing required fields")]
    MissingFields,

    /// Email fails the format check
    #[error("Invalid email")]
    InvalidEmail,

    /// Password policy violation
    #[error("{0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// Path id is not a valid identifier
    #[error("Invalid admin id")]
    InvalidAdminId,

    /// Request body could not be parsed
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Signup with an email that is already registered
    #[error("User already exists")]
    AdminExists,

    /// Update to an email owned by another admin
    #[error("Email already in use")]
    EmailInUse,

    /// Login failed (unknown email or wrong password, deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token on a protected route
    #[error("Unauthorized")]
    Unauthorized,

    /// Bearer token failed signature, format or expiry checks
    #[error("Invalid token")]
    InvalidToken,

    /// Caller tried to delete their own account
    #[error("Cannot delete own account")]
    CannotDeleteSelf,

    /// Delete would remove the last remaining admin
    #[error("Cannot delete the last admin account")]
    LastAdmin,

    /// Target admin of an update/delete does not exist
    #[error("Admin not found")]
    AdminNotFound,

    /// Authenticated identity no longer resolves to a record
    #[error("Not found")]
    NotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::MissingFields
            | AdminError::InvalidEmail
            | AdminError::PasswordPolicy(_)
            | AdminError::InvalidAdminId
            | AdminError::InvalidBody(_)
            | AdminError::LastAdmin => ErrorKind::BadRequest,
            AdminError::AdminExists | AdminError::EmailInUse => ErrorKind::Conflict,
            AdminError::InvalidCredentials | AdminError::Unauthorized | AdminError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AdminError::CannotDeleteSelf => ErrorKind::Forbidden,
            AdminError::AdminNotFound | AdminError::NotFound => ErrorKind::NotFound,
            AdminError::Database(_) | AdminError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AdminError::Database(e) => {
                tracing::error!(error = %e, "Admin database error");
            }
            AdminError::Internal(msg) => {
                tracing::error!(message = %msg, "Admin internal error");
            }
            AdminError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AdminError::InvalidToken => {
                tracing::warn!("Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Admin request rejected");
            }
        }
    }
}

impl From<AdminError> for AppError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::Database(e) => AppError::internal("Admin database error").with_source(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<JsonRejection> for AdminError {
    fn from(rejection: JsonRejection) -> Self {
        AdminError::InvalidBody(rejection.body_text())
    }
}
