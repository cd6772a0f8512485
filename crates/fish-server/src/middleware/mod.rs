//! Middleware stack applied around the router.

pub mod request_id;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, ServerConfig};
use request_id::{propagate_request_id_layer, request_span, set_request_id_layer};

/// Build CORS layer from configuration.
pub fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    let layer = match config.cors_origins()? {
        None => CorsLayer::new().allow_origin(Any),
        Some(origins) => CorsLayer::new().allow_origin(origins),
    };
    Ok(layer.allow_methods(Any).allow_headers(Any))
}

/// Wrap `router` with request IDs, request tracing and CORS.
///
/// Request IDs are assigned before the trace span opens so every log line of
/// a request carries its ID.
pub fn apply(router: Router, config: &ServerConfig) -> Result<Router, ConfigError> {
    Ok(router
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(set_request_id_layer())
        .layer(cors_layer(config)?))
}
