//! Lexicache - caching edge and static file server for a vocabulary learning app
//!
//! Provides an in-memory TTL cache layer with statistics, a service-worker-style
//! edge cache with network-first and cache-first strategies, and a static file
//! server with single-page-app routing.

pub mod api;
pub mod cache;
pub mod config;
pub mod edge;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweeper_task;
