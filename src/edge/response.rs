//! Cached Response Module
//!
//! Full response snapshots as stored in the edge partitions: status, headers,
//! and body. Snapshots are cloned into and out of the partitions, never
//! mutated in place.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde_json::json;

// == Cached Response ==
/// Snapshot of an HTTP response.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers (hop-by-hop headers are dropped at snapshot time)
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: Bytes,
}

impl CachedResponse {
    // == Constructor ==
    pub fn new(status: StatusCode, headers: Vec<(String, String)>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    // == Is Success ==
    /// Whether the snapshot is a 2xx response. Only successful responses are
    /// stored in the partitions.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    // == Content Type ==
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(header::CONTENT_TYPE.as_str()))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the body claims to be JSON.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.starts_with("application/json"))
    }

    // == Synthesized Fallbacks ==
    /// `503` JSON error body, returned when the network fails and no cached
    /// copy exists for an API request.
    pub fn unavailable_json(message: &str) -> Self {
        let body = json!({ "error": message }).to_string();
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            vec![(
                header::CONTENT_TYPE.as_str().to_string(),
                "application/json".to_string(),
            )],
            Bytes::from(body),
        )
    }

    /// `503` plain-text body, returned for uncached static requests while
    /// offline.
    pub fn unavailable_text(message: &str) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            vec![(
                header::CONTENT_TYPE.as_str().to_string(),
                "text/plain".to_string(),
            )],
            Bytes::from(message.to_string()),
        )
    }

    /// `404` plain-text body, the filesystem origin's answer for a missing file.
    pub fn not_found(path: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            vec![(
                header::CONTENT_TYPE.as_str().to_string(),
                "text/plain".to_string(),
            )],
            Bytes::from(format!("Not found: {path}")),
        )
    }
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let mut builder = Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        builder
            .body(Body::from(self.body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_lookup_case_insensitive() {
        let resp = CachedResponse::new(
            StatusCode::OK,
            vec![("Content-Type".to_string(), "application/json".to_string())],
            Bytes::from_static(b"{}"),
        );
        assert_eq!(resp.content_type(), Some("application/json"));
        assert!(resp.is_json());
    }

    #[test]
    fn test_json_with_charset_suffix() {
        let resp = CachedResponse::new(
            StatusCode::OK,
            vec![(
                "content-type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )],
            Bytes::from_static(b"{}"),
        );
        assert!(resp.is_json());
    }

    #[test]
    fn test_unavailable_json_shape() {
        let resp = CachedResponse::unavailable_json("network error");
        assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(resp.is_json());
        let value: serde_json::Value = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(value["error"], "network error");
    }

    #[test]
    fn test_not_found_is_not_success() {
        let resp = CachedResponse::not_found("/missing.js");
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert!(!resp.is_success());
    }
}
