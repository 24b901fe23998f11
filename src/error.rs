// HTTP API Error Types
use axum::{
    extract::rejection::BytesRejection,
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::database::{DatabaseError, ValidationError};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation(ValidationError),

    // 401 Unauthorized
    Unauthorized,

    // 413 Payload Too Large
    PayloadTooLarge,

    // 500 Internal Server Error
    InternalServerError,
}

impl ApiError {
    pub const INVALID_CREDENTIALS: &'static str = "Invalid credentials";
    pub const INTERNAL_ERROR: &'static str = "Internal server error";
    pub const PAYLOAD_TOO_LARGE: &'static str = "Request body too large";

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(err) => err.to_string(),
            ApiError::Unauthorized => Self::INVALID_CREDENTIALS.to_string(),
            ApiError::PayloadTooLarge => Self::PAYLOAD_TOO_LARGE.to_string(),
            ApiError::InternalServerError => Self::INTERNAL_ERROR.to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        // A body that could not be read in full is no more usable than a
        // syntactically broken one
        tracing::debug!("Failed to read request body: {}", rejection.body_text());
        ApiError::Validation(ValidationError::InvalidJson)
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but return generic message
        match &err {
            DatabaseError::QueryError(msg) => tracing::error!("Database query error: {}", msg),
            DatabaseError::Sqlx(sqlx_err) => tracing::error!("SQLx error: {}", sqlx_err),
        }
        ApiError::InternalServerError
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let mut response = (self.status_code(), Json(self.to_json())).into_response();
        if matches!(self, ApiError::Unauthorized) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        response
    }
}

/// Body used when a handler panics; installed via `CatchPanicLayer`
pub fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    tracing::error!("Handler panicked while processing request");
    ApiError::InternalServerError.into_response()
}
