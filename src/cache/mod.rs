//! Cache Module
//!
//! In-memory caching layer: a generic TTL store, the canonical key builder,
//! operation statistics, and the session facade owning the API and
//! static-asset stores.

pub mod clock;
mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use clock::{system_clock, Clock, SystemClock};
pub use entry::CacheEntry;
pub use key::{build_key, build_key_from_query};
pub use stats::{CacheStats, MemoryUsage, StatsSnapshot};
pub use store::{SessionCache, StaticAsset, TtlStore};

// == Public Constants ==
/// Default TTL for cached API responses
pub const DEFAULT_API_TTL_SECS: u64 = 5 * 60;

/// Default TTL for cached static assets
pub const DEFAULT_STATIC_TTL_SECS: u64 = 24 * 60 * 60;

/// Default interval between expiry sweeps
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 10 * 60;
