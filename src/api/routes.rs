//! API Routes
//!
//! Configures the Axum router with the proxy, static, and monitoring
//! endpoints.

use axum::{
    routing::{any, delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    api_proxy_handler, clear_cache_handler, control_handler, health_handler, invalidate_handler,
    keys_handler, reset_stats_handler, static_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `ANY /api/*` - Reverse proxy to the upstream gateway, both cache layers wired
/// - `GET /health` - Health check with uptime
/// - `GET /cache/stats` - Cache statistics snapshot
/// - `GET /cache/keys` - Currently cached keys per store
/// - `POST /cache/stats/reset` - Zero the counters
/// - `DELETE /cache` - Clear the API store
/// - `POST /cache/invalidate` - Pattern-based invalidation
/// - `POST /cache/control` - Edge cache control messages (CLEAR_CACHE)
/// - fallback - Static bundle with single-page-app routing
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/health", get(health_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/keys", get(keys_handler))
        .route("/cache/stats/reset", post(reset_stats_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/cache/invalidate", post(invalidate_handler))
        .route("/cache/control", post(control_handler))
        .route("/api/*path", any(api_proxy_handler))
        .fallback(static_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
