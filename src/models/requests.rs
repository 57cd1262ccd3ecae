//! Request DTOs for the caching server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for pattern-based invalidation (POST /cache/invalidate)
///
/// # Fields
/// - `pattern`: literal substring; every cached key containing it is removed
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    /// The substring to match against cached keys
    pub pattern: String,
}

impl InvalidateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.pattern.is_empty() {
            return Some("Pattern cannot be empty".to_string());
        }
        None
    }
}

/// Control message for the edge cache (POST /cache/control)
///
/// Mirrors the message shape the service worker listened for.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ControlMessage {
    /// Delete both edge partitions outright
    #[serde(rename = "CLEAR_CACHE")]
    ClearCache,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_request_deserialize() {
        let json = r#"{"pattern": "/api/words"}"#;
        let req: InvalidateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.pattern, "/api/words");
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_empty_pattern() {
        let req = InvalidateRequest {
            pattern: "".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_control_message_clear_cache() {
        let json = r#"{"type": "CLEAR_CACHE"}"#;
        let msg: ControlMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ControlMessage::ClearCache));
    }

    #[test]
    fn test_control_message_unknown_type_rejected() {
        let json = r#"{"type": "SELF_DESTRUCT"}"#;
        assert!(serde_json::from_str::<ControlMessage>(json).is_err());
    }
}
