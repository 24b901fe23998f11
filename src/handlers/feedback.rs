// handlers/feedback.rs - POST /api/feedback handler

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
};

use crate::database::{FeedbackRecord, ValidationError};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub const SAVED_MESSAGE: &str = "Feedback successfully saved";

/**
 * POST /api/feedback - Record a thumbs up / thumbs down for a page
 *
 * Basic authentication is enforced by `basic_auth_middleware` before this
 * handler runs. The body is taken as raw bytes so that a missing or wrong
 * `Content-Type` does not change which error the client sees.
 *
 * Expected Input:
 * ```json
 * {
 *   "session_id": "abc123",          // Optional
 *   "page_context": {"page": "home"}, // Required: JSON object
 *   "action": "thumbs_up"             // Required: thumbs_up | thumbs_down
 * }
 * ```
 *
 * Expected Output (Success):
 * ```json
 * { "message": "Feedback successfully saved" }
 * ```
 *
 * Errors are `{"error": "..."}` with 400 for invalid input, 413 for bodies
 * over `server.max_request_size_bytes` and 500 for any storage failure.
 */
pub async fn post(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult {
    let body = body.map_err(|rejection| {
        let err = ApiError::from(rejection);
        if let ApiError::PayloadTooLarge = err {
            tracing::warn!(
                limit = state.config.server.max_request_size_bytes,
                "Rejected feedback body over the size limit"
            );
        }
        err
    })?;

    let record = FeedbackRecord::from_body(&body).map_err(|err| {
        if let ValidationError::InvalidAction(_) = &err {
            tracing::warn!("{}", err);
        } else {
            tracing::debug!("Rejected feedback payload: {}", err);
        }
        ApiError::from(err)
    })?;

    state.store.insert(&record).await?;

    tracing::info!(
        session_id = record.session_id.as_deref().unwrap_or("-"),
        action = %record.action,
        "Feedback saved"
    );
    Ok(ApiResponse::success(SAVED_MESSAGE))
}
