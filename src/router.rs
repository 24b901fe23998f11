use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::{Environment, SecurityConfig};
use crate::error::panic_response;
use crate::handlers;
use crate::middleware::basic_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/health", get(handlers::health::get))
        .merge(feedback_routes(state.clone()))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http());

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(state.config.environment, &state.config.security));
    }

    router.with_state(state)
}

fn feedback_routes(state: AppState) -> Router<AppState> {
    let body_limit = state.config.server.max_request_size_bytes;

    Router::new()
        .route("/api/feedback", post(handlers::feedback::post))
        .layer(DefaultBodyLimit::max(body_limit))
        // route_layer so unmatched paths still 404 instead of 401
        .route_layer(from_fn_with_state(state, basic_auth_middleware))
}

fn cors_layer(environment: Environment, security: &SecurityConfig) -> CorsLayer {
    if environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
