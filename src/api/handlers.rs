//! API Handlers
//!
//! HTTP request handlers: the `/api` reverse proxy that wires both caching
//! layers together, the static asset path with SPA fallback, and the cache
//! monitoring surface.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{build_key_from_query, system_clock, SessionCache, StatsSnapshot};
use crate::config::Config;
use crate::edge::{EdgeCache, FsOrigin, HttpOrigin, OriginRequest};
use crate::error::{CacheError, Result};
use crate::models::{
    ControlMessage, HealthResponse, InvalidateRequest, InvalidateResponse, KeysResponse,
    MessageResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// In-memory caching layer (API responses + static assets + statistics)
    pub cache: Arc<RwLock<SessionCache>>,
    /// Service-worker-style edge cache
    pub edge: Arc<EdgeCache>,
    /// Process start time, for the health endpoint's uptime
    pub started_at: Instant,
}

impl AppState {
    /// Creates a new AppState from already-built parts.
    pub fn new(cache: Arc<RwLock<SessionCache>>, edge: Arc<EdgeCache>) -> Self {
        Self {
            cache,
            edge,
            started_at: Instant::now(),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires the filesystem origin through the session cache's asset store
    /// and points the HTTP origin at the upstream gateway.
    pub fn from_config(config: &Config) -> Self {
        let cache = Arc::new(RwLock::new(SessionCache::new(
            std::time::Duration::from_secs(config.api_ttl),
            std::time::Duration::from_secs(config.static_ttl),
            system_clock(),
        )));
        let api_origin = Arc::new(HttpOrigin::new(config.upstream_url.clone()));
        let static_origin = Arc::new(FsOrigin::new(config.static_dir.clone(), cache.clone()));
        let edge = Arc::new(EdgeCache::new(
            &config.cache_version,
            api_origin,
            static_origin,
        ));
        Self::new(cache, edge)
    }
}

/// Invalidation prefix for a mutated collection: the first two path
/// segments, e.g. `/api/words/5/check` -> `/api/words`.
fn collection_prefix(path: &str) -> Option<String> {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .take(2)
        .collect();
    if segments.len() == 2 {
        Some(format!("/{}", segments.join("/")))
    } else {
        None
    }
}

/// Handler for every method under /api/*
///
/// GET requests consult the in-memory API store first, then go through the
/// edge's network-first path; successful JSON responses are stored back.
/// Mutations are forwarded and, on success, invalidate the in-memory store
/// for the touched collection. The edge partitions are left to the
/// network-first refresh — the two layers carry no shared invalidation
/// signal beyond that.
pub async fn api_proxy_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| path.clone());

    if method == Method::GET {
        let key = build_key_from_query(&path, uri.query());

        if let Some(value) = state.cache.write().await.get_api(&key) {
            debug!(%key, "api response served from session cache");
            return Json(value).into_response();
        }

        let request = OriginRequest {
            method,
            path_and_query,
            content_type: None,
            body: Bytes::new(),
        };
        let response = state.edge.handle_api(&request).await;

        if response.is_success() && response.is_json() {
            if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&response.body) {
                state.cache.write().await.set_api(key, value);
            }
        }
        response.into_response()
    } else {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let request = OriginRequest {
            method,
            path_and_query,
            content_type,
            body,
        };
        let response = state.edge.handle_api(&request).await;

        if response.is_success() {
            if let Some(prefix) = collection_prefix(&path) {
                let removed = state.cache.write().await.clear_by_pattern(&prefix);
                if removed > 0 {
                    debug!(%prefix, removed, "mutation invalidated session cache entries");
                }
            }
        }
        response.into_response()
    }
}

/// Fallback handler for everything outside /api/*
///
/// Serves the asset bundle cache-first through the edge; unmatched routes
/// resolve to the entry document for single-page-app routing.
pub async fn static_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return CacheError::InvalidRequest(format!("Unsupported method: {method}")).into_response();
    }

    let wants_document = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"));

    state.edge.handle_static(uri.path(), wants_document).await.into_response()
}

/// Handler for GET /health
///
/// Returns status, timestamp, and process uptime.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.started_at.elapsed().as_secs_f64()))
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    let cache = state.cache.read().await;
    Json(cache.snapshot())
}

/// Handler for GET /cache/keys
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let cache = state.cache.read().await;
    let (api, assets) = cache.keys();
    Json(KeysResponse { api, assets })
}

/// Handler for POST /cache/stats/reset
///
/// Zeroes the counters without touching stored entries.
pub async fn reset_stats_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.write().await.reset_stats();
    Json(MessageResponse::new("Cache statistics reset"))
}

/// Handler for DELETE /cache
///
/// Empties the API store. The static-asset store keeps its own clear
/// primitive but is not exposed here, matching the monitoring surface.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.write().await.clear_api();
    Json(MessageResponse::new("API cache cleared"))
}

/// Handler for POST /cache/invalidate
///
/// Removes every cached API entry whose key contains the given substring.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let removed = state.cache.write().await.clear_by_pattern(&req.pattern);
    Ok(Json(InvalidateResponse::new(&req.pattern, removed)))
}

/// Handler for POST /cache/control
///
/// Accepts the edge cache's control message; `CLEAR_CACHE` deletes both
/// partitions outright.
pub async fn control_handler(
    State(state): State<AppState>,
    Json(message): Json<ControlMessage>,
) -> Json<MessageResponse> {
    match message {
        ControlMessage::ClearCache => {
            let (static_size, api_size) = state.edge.partition_sizes();
            debug!(static_size, api_size, "purging edge partitions");
            state.edge.purge();
            Json(MessageResponse::new("Edge partitions cleared"))
        }
    }
}
