//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{DEFAULT_API_TTL_SECS, DEFAULT_STATIC_TTL_SECS, DEFAULT_SWEEP_INTERVAL_SECS};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the upstream word/practice API gateway
    pub upstream_url: String,
    /// Directory holding the pre-built asset bundle
    pub static_dir: PathBuf,
    /// TTL in seconds for cached API responses
    pub api_ttl: u64,
    /// TTL in seconds for cached static assets
    pub static_ttl: u64,
    /// Background expiry sweep interval in seconds
    pub sweep_interval: u64,
    /// Edge cache version, part of the partition names
    pub cache_version: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `GATEWAY_API_URL` - Upstream API base URL (default: http://localhost:8080)
    /// - `STATIC_DIR` - Asset bundle directory (default: dist)
    /// - `API_CACHE_TTL` - API response TTL in seconds (default: 300)
    /// - `STATIC_CACHE_TTL` - Static asset TTL in seconds (default: 86400)
    /// - `SWEEP_INTERVAL` - Expiry sweep frequency in seconds (default: 600)
    /// - `CACHE_VERSION` - Edge partition version suffix (default: v1)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            upstream_url: env::var("GATEWAY_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("dist")),
            api_ttl: env::var("API_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_API_TTL_SECS),
            static_ttl: env::var("STATIC_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_STATIC_TTL_SECS),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
            cache_version: env::var("CACHE_VERSION").unwrap_or_else(|_| "v1".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            upstream_url: "http://localhost:8080".to_string(),
            static_dir: PathBuf::from("dist"),
            api_ttl: DEFAULT_API_TTL_SECS,
            static_ttl: DEFAULT_STATIC_TTL_SECS,
            sweep_interval: DEFAULT_SWEEP_INTERVAL_SECS,
            cache_version: "v1".to_string(),
        }
    }
}
