use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::BasicCredentials;
use crate::error::ApiError;
use crate::state::AppState;

/// Basic authentication middleware.
///
/// Runs before the handler extracts the body, so a rejected request never
/// has its payload read or reaches the store.
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credentials = BasicCredentials::from_headers(request.headers()).map_err(|reason| {
        tracing::warn!(?reason, path = %request.uri().path(), "Rejected request without usable Basic credentials");
        ApiError::Unauthorized
    })?;

    if !credentials.matches(&state.config.auth) {
        tracing::warn!(path = %request.uri().path(), "Rejected request with invalid credentials");
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
