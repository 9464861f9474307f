//! API error types with HTTP response mapping.
//!
//! Validation failures of the order workflow surface as `400` responses
//! whose plain-text body is the error's display string; lookup misses on
//! read paths surface as `404`; storage faults are logged and collapsed
//! into a generic `500`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use vendo_core::{OrderError, ValidationError};
use vendo_db::{CheckoutError, DbError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found on a read path.
    NotFound(String),
    /// Malformed or rejected request.
    BadRequest(String),
    /// Order workflow validation failure.
    Order(OrderError),
    /// Product field validation failure.
    Validation(ValidationError),
    /// Storage layer failure.
    Db(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Order(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Db(err) => db_error_to_response(err),
        };

        (status, message).into_response()
    }
}

fn db_error_to_response(err: DbError) -> (StatusCode, String) {
    match &err {
        DbError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        DbError::UniqueViolation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        DbError::ForeignKeyViolation { .. } => {
            (StatusCode::BAD_REQUEST, "Invalid reference".to_string())
        }
        _ => {
            tracing::error!(error = %err, "database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::Db(err)
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Order(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Order(e) => ApiError::Order(e),
            CheckoutError::Db(e) => ApiError::Db(e),
        }
    }
}
