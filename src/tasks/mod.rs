//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry Sweeper: removes stale entries from both in-memory cache stores
//!   at the configured interval

mod sweeper;

pub use sweeper::spawn_sweeper_task;
