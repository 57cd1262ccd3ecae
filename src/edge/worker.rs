//! Edge Cache Worker
//!
//! The browser-level intercepting layer reimagined as a server-side edge:
//! two versioned response partitions with distinct fetch strategies,
//! an install/activate lifecycle, and an explicit purge command.
//!
//! Strategies:
//! - API requests are network-first: the upstream is always tried; its
//!   successful GET responses are snapshotted; on network failure the cached
//!   snapshot is served, else a synthesized `503` JSON body.
//! - Static requests are cache-first: a cached snapshot short-circuits the
//!   origin entirely; offline document requests fall back to the cached root
//!   document.

use std::sync::Arc;

use axum::http::Method;
use tracing::{debug, info, warn};

use crate::edge::{CachedResponse, Origin, OriginRequest, Partition, PartitionSet};

/// Partition key for a request: method plus path-and-query.
fn partition_key(method: &Method, target: &str) -> String {
    format!("{method} {target}")
}

// == Edge Cache ==
pub struct EdgeCache {
    partitions: PartitionSet,
    static_name: String,
    api_name: String,
    api_origin: Arc<dyn Origin>,
    static_origin: Arc<dyn Origin>,
}

impl EdgeCache {
    // == Constructor ==
    /// Creates the edge cache for `version`, opening the two expected
    /// partitions (`static-{version}`, `api-{version}`).
    pub fn new(version: &str, api_origin: Arc<dyn Origin>, static_origin: Arc<dyn Origin>) -> Self {
        let edge = Self {
            partitions: PartitionSet::new(),
            static_name: format!("static-{version}"),
            api_name: format!("api-{version}"),
            api_origin,
            static_origin,
        };
        edge.partitions.open(&edge.static_name);
        edge.partitions.open(&edge.api_name);
        edge
    }

    fn static_partition(&self) -> Arc<Partition> {
        self.partitions.open(&self.static_name)
    }

    fn api_partition(&self) -> Arc<Partition> {
        self.partitions.open(&self.api_name)
    }

    // == Install ==
    /// Precaches the critical-file manifest into the static partition.
    ///
    /// A file that fails to cache is logged and skipped; install never fails
    /// as a whole.
    pub async fn install(&self, manifest: &[&str]) {
        let partition = self.static_partition();
        for path in manifest {
            match self.static_origin.fetch(&OriginRequest::get(path)).await {
                Ok(response) if response.is_success() => {
                    partition.put(partition_key(&Method::GET, path), response);
                }
                Ok(response) => {
                    warn!(%path, status = %response.status, "precache skipped non-success response");
                }
                Err(err) => {
                    warn!(%path, error = %err, "failed to precache file");
                }
            }
        }
        info!(cached = partition.len(), "edge cache installed");
    }

    // == Activate ==
    /// Deletes every partition not matching the current version's expected
    /// names, so old versions do not linger.
    pub fn activate(&self) {
        for name in self.partitions.names() {
            if name != self.static_name && name != self.api_name {
                self.partitions.delete(&name);
                info!(partition = %name, "deleted stale edge partition");
            }
        }
    }

    // == Network-First (API) ==
    /// Handles an API request: upstream first, cached snapshot on network
    /// failure, synthesized `503` JSON when neither is available.
    pub async fn handle_api(&self, request: &OriginRequest) -> CachedResponse {
        let key = partition_key(&request.method, &request.path_and_query);

        match self.api_origin.fetch(request).await {
            Ok(response) => {
                if request.method == Method::GET && response.is_success() {
                    self.api_partition().put(key, response.clone());
                }
                response
            }
            Err(err) => {
                warn!(key = %key, error = %err, "upstream unreachable, trying api partition");
                match self.api_partition().match_key(&key) {
                    Some(cached) => {
                        debug!(key = %key, "served stale api snapshot");
                        cached
                    }
                    None => {
                        CachedResponse::unavailable_json("Network error and no cached data available")
                    }
                }
            }
        }
    }

    // == Cache-First (Static) ==
    /// Handles a static request: cached snapshot first, then the filesystem
    /// origin. When the origin fails, document requests fall back to the
    /// cached root document; everything else gets a `503`.
    pub async fn handle_static(&self, path: &str, wants_document: bool) -> CachedResponse {
        let partition = self.static_partition();
        let key = partition_key(&Method::GET, path);

        if let Some(cached) = partition.match_key(&key) {
            return cached;
        }

        match self.static_origin.fetch(&OriginRequest::get(path)).await {
            Ok(response) => {
                if response.is_success() {
                    partition.put(key, response.clone());
                }
                response
            }
            Err(err) => {
                warn!(%path, error = %err, "static origin failed");
                if wants_document {
                    if let Some(root) = partition.match_key(&partition_key(&Method::GET, "/")) {
                        debug!(%path, "served cached root document as offline fallback");
                        return root;
                    }
                }
                CachedResponse::unavailable_text("Offline content not available")
            }
        }
    }

    // == Purge ==
    /// Deletes both named partitions outright, independent of the lifecycle.
    pub fn purge(&self) {
        self.partitions.delete(&self.static_name);
        self.partitions.delete(&self.api_name);
        info!("edge partitions purged");
    }

    // == Sizes ==
    /// Current snapshot counts of `(static, api)` partitions.
    pub fn partition_sizes(&self) -> (usize, usize) {
        (self.static_partition().len(), self.api_partition().len())
    }
}
