use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Success body of the form `{"message": "..."}`
#[derive(Debug)]
pub struct ApiResponse {
    pub message: &'static str,
    pub status_code: StatusCode,
}

impl ApiResponse {
    /// Create a successful API response with 200 status
    pub fn success(message: &'static str) -> Self {
        Self {
            message,
            status_code: StatusCode::OK,
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(json!({ "message": self.message }))).into_response()
    }
}

pub type ApiResult = Result<ApiResponse, crate::error::ApiError>;
