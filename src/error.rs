//! Error types for the caching server
//!
//! Provides unified error handling using thiserror.
//!
//! Absence of cached data is never an error anywhere in this crate — cache
//! misses are represented as `Option::None`. These variants cover request
//! validation and origin failures only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the caching server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream API fetch failed
    #[error("Upstream fetch failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Static file read failed
    #[error("Static file read failed: {0}")]
    Io(#[from] std::io::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::Upstream(err) => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
            CacheError::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching server.
pub type Result<T> = std::result::Result<T, CacheError>;
