//! Origin Module
//!
//! Sources the edge cache fetches from when a partition cannot answer: the
//! upstream API gateway over HTTP, and the static asset bundle on disk. Both
//! sit behind the `Origin` trait so the fetch strategies can be exercised
//! against a failing origin in tests.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, Method, StatusCode};
use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{SessionCache, StaticAsset};
use crate::edge::CachedResponse;
use crate::error::{CacheError, Result};

// == Origin Request ==
/// The parts of an intercepted request an origin needs to answer it.
#[derive(Debug, Clone)]
pub struct OriginRequest {
    pub method: Method,
    /// Path with query string, e.g. `/api/words?page=2`
    pub path_and_query: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl OriginRequest {
    /// A bare GET request for `path`.
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::GET,
            path_and_query: path.to_string(),
            content_type: None,
            body: Bytes::new(),
        }
    }

    /// The path portion, without any query string.
    pub fn path(&self) -> &str {
        self.path_and_query
            .split_once('?')
            .map_or(self.path_and_query.as_str(), |(path, _)| path)
    }
}

// == Origin Trait ==
/// Something the edge cache can fetch a response from.
///
/// `Err` means the origin was unreachable (the network failed, the disk
/// errored); an HTTP-level failure such as a 404 or 500 is a normal `Ok`
/// response and is never turned into an error.
#[async_trait]
pub trait Origin: Send + Sync {
    async fn fetch(&self, request: &OriginRequest) -> Result<CachedResponse>;
}

// == HTTP Origin ==
/// Forwards requests to the upstream API gateway.
pub struct HttpOrigin {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrigin {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Headers that must not be replayed from a snapshot.
const HOP_BY_HOP: &[&str] = &["connection", "keep-alive", "transfer-encoding", "content-length"];

#[async_trait]
impl Origin for HttpOrigin {
    async fn fetch(&self, request: &OriginRequest) -> Result<CachedResponse> {
        let url = format!("{}{}", self.base_url, request.path_and_query);
        debug!(method = %request.method, %url, "forwarding to upstream");

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(content_type) = &request.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter(|(name, _)| !HOP_BY_HOP.contains(&name.as_str()))
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(CachedResponse::new(status, headers, body))
    }
}

// == Filesystem Origin ==
/// Serves the pre-built asset bundle from disk, reading through the
/// session cache's static-asset store so repeated reads within the asset
/// TTL skip the filesystem.
///
/// Routes without a file extension resolve to the entry document, which is
/// what gives the single-page app its client-side routing.
pub struct FsOrigin {
    root: PathBuf,
    cache: Arc<RwLock<SessionCache>>,
}

impl FsOrigin {
    pub fn new(root: impl Into<PathBuf>, cache: Arc<RwLock<SessionCache>>) -> Self {
        Self {
            root: root.into(),
            cache,
        }
    }

    /// Maps a request path to a file under the bundle root.
    ///
    /// Returns `None` for traversal attempts.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let trimmed = path.trim_start_matches('/');
        let relative = Path::new(trimmed);
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir))
        {
            return None;
        }

        let is_route = trimmed.is_empty() || relative.extension().is_none();
        if is_route {
            Some(self.root.join("index.html"))
        } else {
            Some(self.root.join(relative))
        }
    }
}

/// Content type by file extension, covering the bundle's asset kinds.
fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "application/javascript",
        Some("css") => "text/css",
        Some("json") | Some("map") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl Origin for FsOrigin {
    async fn fetch(&self, request: &OriginRequest) -> Result<CachedResponse> {
        let path = request.path();

        // Read-through the in-memory asset store first.
        if let Some(asset) = self.cache.read().await.get_asset(path) {
            return Ok(CachedResponse::new(
                StatusCode::OK,
                vec![(
                    header::CONTENT_TYPE.as_str().to_string(),
                    asset.content_type.clone(),
                )],
                asset.body,
            ));
        }

        let Some(file) = self.resolve(path) else {
            return Ok(CachedResponse::not_found(path));
        };

        match tokio::fs::read(&file).await {
            Ok(contents) => {
                let content_type = content_type_for(&file).to_string();
                let body = Bytes::from(contents);
                self.cache.write().await.set_asset(
                    path.to_string(),
                    StaticAsset {
                        content_type: content_type.clone(),
                        body: body.clone(),
                    },
                );
                Ok(CachedResponse::new(
                    StatusCode::OK,
                    vec![(header::CONTENT_TYPE.as_str().to_string(), content_type)],
                    body,
                ))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(CachedResponse::not_found(path))
            }
            Err(err) => Err(CacheError::Io(err)),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::system_clock;
    use std::time::Duration;

    fn session_cache() -> Arc<RwLock<SessionCache>> {
        Arc::new(RwLock::new(SessionCache::new(
            Duration::from_secs(300),
            Duration::from_secs(86_400),
            system_clock(),
        )))
    }

    fn write_bundle(dir: &Path) {
        std::fs::write(dir.join("index.html"), "<html>app</html>").unwrap();
        std::fs::write(dir.join("app.js"), "export {}").unwrap();
    }

    #[test]
    fn test_origin_request_path_strips_query() {
        let request = OriginRequest::get("/api/words?page=2");
        assert_eq!(request.path(), "/api/words");
        assert_eq!(OriginRequest::get("/api/words").path(), "/api/words");
    }

    #[tokio::test]
    async fn test_fs_origin_serves_file_with_content_type() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        let origin = FsOrigin::new(dir.path(), session_cache());

        let response = origin.fetch(&OriginRequest::get("/app.js")).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type(), Some("application/javascript"));
        assert_eq!(response.body, Bytes::from_static(b"export {}"));
    }

    #[tokio::test]
    async fn test_fs_origin_spa_routes_serve_entry_document() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        let origin = FsOrigin::new(dir.path(), session_cache());

        for path in ["/", "/practice", "/words/5"] {
            let response = origin.fetch(&OriginRequest::get(path)).await.unwrap();
            assert_eq!(response.status, StatusCode::OK, "path {path}");
            assert_eq!(response.body, Bytes::from_static(b"<html>app</html>"));
        }
    }

    #[tokio::test]
    async fn test_fs_origin_missing_file_is_404_not_error() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        let origin = FsOrigin::new(dir.path(), session_cache());

        let response = origin.fetch(&OriginRequest::get("/missing.js")).await.unwrap();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fs_origin_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        let origin = FsOrigin::new(dir.path(), session_cache());

        let response = origin
            .fetch(&OriginRequest::get("/../Cargo.toml"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fs_origin_reads_through_asset_store() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        let cache = session_cache();
        let origin = FsOrigin::new(dir.path(), cache.clone());

        origin.fetch(&OriginRequest::get("/app.js")).await.unwrap();
        assert_eq!(cache.read().await.asset_len(), 1);

        // Second fetch is answered from memory even after the file changes.
        std::fs::write(dir.path().join("app.js"), "changed").unwrap();
        let response = origin.fetch(&OriginRequest::get("/app.js")).await.unwrap();
        assert_eq!(response.body, Bytes::from_static(b"export {}"));
    }
}
