//! Error conversions - database helpers and HTTP rendering
//!
//! Domain crates convert their own errors into [`AppError`]; this module
//! only classifies driver errors and renders [`AppError`] as a response.

use super::app_error::AppError;

// ============================================================================
// SQLx helpers (feature-gated)
// ============================================================================

/// Whether the error is a PostgreSQL unique-constraint violation (`23505`).
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({ "error": self.public_message() });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_status() {
        use super::*;
        use crate::error::kind::ErrorKind;
        use axum::response::IntoResponse;

        let response =
            AppError::new(ErrorKind::Forbidden, "Cannot delete own account").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);

        let response = AppError::too_many_requests("slow down").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::TOO_MANY_REQUESTS);

        let response = AppError::internal("pool closed").into_response();
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_non_database_errors_are_not_unique_violations() {
        assert!(!super::is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
