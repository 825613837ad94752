//! Listing Error Types
//!
//! Listing-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{BytesRejection, FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Listing-specific result type alias
pub type ListingResult<T> = Result<T, ListingError>;

/// Listing-specific error variants
#[derive(Debug, Error)]
pub enum ListingError {
    /// Path id is not a valid identifier
    #[error("Invalid id")]
    InvalidId,

    /// No listing with that id
    #[error("Not found")]
    NotFound,

    /// A submitted field failed validation
    #[error("{0}")]
    Validation(String),

    /// Body could not be parsed as JSON or multipart
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Body exceeds the configured upload limit
    #[error("Upload too large")]
    PayloadTooLarge,

    /// Writing an uploaded file failed
    #[error("Media storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ListingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ListingError::InvalidId | ListingError::Validation(_) | ListingError::InvalidBody(_) => {
                ErrorKind::BadRequest
            }
            ListingError::NotFound => ErrorKind::NotFound,
            ListingError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            ListingError::Storage(_) | ListingError::Database(_) | ListingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ListingError::Database(e) => {
                tracing::error!(error = %e, "Listing database error");
            }
            ListingError::Storage(e) => {
                tracing::error!(error = %e, "Listing media storage error");
            }
            ListingError::Internal(msg) => {
                tracing::error!(message = %msg, "Listing internal error");
            }
            ListingError::PayloadTooLarge => {
                tracing::warn!("Listing upload rejected: too large");
            }
            _ => {
                tracing::debug!(error = %self, "Listing request rejected");
            }
        }
    }
}

impl From<ListingError> for AppError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Storage(e) => AppError::internal("Media storage error").with_source(e),
            ListingError::Database(e) => AppError::internal("Listing database error").with_source(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<JsonRejection> for ListingError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ListingError::PayloadTooLarge;
        }
        ListingError::InvalidBody(rejection.body_text())
    }
}

impl From<FormRejection> for ListingError {
    fn from(rejection: FormRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ListingError::PayloadTooLarge;
        }
        ListingError::InvalidBody(rejection.body_text())
    }
}

impl From<BytesRejection> for ListingError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ListingError::PayloadTooLarge;
        }
        ListingError::InvalidBody(rejection.body_text())
    }
}

impl From<MultipartRejection> for ListingError {
    fn from(rejection: MultipartRejection) -> Self {
        ListingError::InvalidBody(rejection.body_text())
    }
}

impl From<MultipartError> for ListingError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ListingError::PayloadTooLarge;
        }
        ListingError::InvalidBody(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases: Vec<(ListingError, StatusCode)> = vec![
            (ListingError::InvalidId, StatusCode::BAD_REQUEST),
            (ListingError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ListingError::InvalidBody("x".into()), StatusCode::BAD_REQUEST),
            (ListingError::NotFound, StatusCode::NOT_FOUND),
            (ListingError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (
                ListingError::Storage(std::io::Error::other("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ListingError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected);
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_storage_detail_is_not_exposed() {
        use std::error::Error;

        let app_err = AppError::from(ListingError::Storage(std::io::Error::other("/srv/uploads")));
        assert_eq!(app_err.public_message(), "Internal server error");
        assert!(app_err.source().is_some());
    }
}
