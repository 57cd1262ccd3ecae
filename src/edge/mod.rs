//! Edge Cache Module
//!
//! Server-side rendition of the browser service worker: named response
//! partitions with network-first (API) and cache-first (static) strategies,
//! an install/activate lifecycle, and an explicit purge command.

mod origin;
mod partition;
mod response;
mod worker;

// Re-export public types
pub use origin::{FsOrigin, HttpOrigin, Origin, OriginRequest};
pub use partition::{Partition, PartitionSet};
pub use response::CachedResponse;
pub use worker::EdgeCache;

// == Public Constants ==
/// Critical files precached into the static partition at install time.
pub const PRECACHE_MANIFEST: &[&str] = &["/", "/index.html"];
