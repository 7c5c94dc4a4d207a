//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the evaluation endpoints and the health check under
//! the tracing and CORS layers. The request deadline is enforced by the
//! evaluation handlers so that an expired request still gets the `{ error }`
//! envelope.

pub mod evaluation;

pub use evaluation::{evaluation_routes, ErrorResponse, EvaluationHandlers, HealthResponse};

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Builds the full application router.
pub fn app_router(handlers: EvaluationHandlers, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(evaluation::health))
        .merge(evaluation_routes(
            handlers.with_request_timeout(server.request_timeout()),
        ))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// Permissive when no origins are configured.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
