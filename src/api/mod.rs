//! API Module
//!
//! HTTP handlers and routing for the caching server.
//!
//! # Endpoints
//! - `ANY /api/*` - Reverse proxy to the upstream word/practice gateway
//! - `GET /health` - Health check with uptime
//! - `GET /cache/stats` - Cache statistics
//! - `GET /cache/keys` - Cached key listing
//! - `POST /cache/stats/reset` - Reset statistics
//! - `DELETE /cache` - Clear the API cache store
//! - `POST /cache/invalidate` - Pattern-based invalidation
//! - `POST /cache/control` - Edge cache purge command
//! - fallback - Static asset bundle with SPA routing

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
