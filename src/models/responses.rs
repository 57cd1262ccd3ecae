//! Response DTOs for the caching server API
//!
//! Defines the structure of outgoing HTTP response bodies. The statistics
//! response is the `StatsSnapshot` from the cache module, serialized as-is.

use serde::Serialize;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "OK")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Process uptime in seconds
    pub uptime: f64,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp and the given uptime.
    pub fn ok(uptime_seconds: f64) -> Self {
        Self {
            status: "OK".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime: uptime_seconds,
        }
    }
}

/// Generic confirmation body for clear/reset/control operations
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Success message
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for pattern invalidation (POST /cache/invalidate)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl InvalidateResponse {
    pub fn new(pattern: &str, removed: usize) -> Self {
        Self {
            message: format!("Invalidated {removed} entries matching '{pattern}'"),
            removed,
        }
    }
}

/// Response body for the key listing (GET /cache/keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    /// API store keys
    pub api: Vec<String>,
    /// Static-asset store keys
    #[serde(rename = "static")]
    pub assets: Vec<String>,
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::ok(12.5);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("OK"));
        assert!(json.contains("timestamp"));
        assert!(json.contains("12.5"));
    }

    #[test]
    fn test_invalidate_response_message() {
        let resp = InvalidateResponse::new("/api/words", 3);
        assert_eq!(resp.removed, 3);
        assert!(resp.message.contains("/api/words"));
        assert!(resp.message.contains('3'));
    }

    #[test]
    fn test_keys_response_renames_assets_field() {
        let resp = KeysResponse {
            api: vec!["/api/words".to_string()],
            assets: vec!["/index.html".to_string()],
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"static\""));
        assert!(!json.contains("assets"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
