//! Cache Module
//!
//! In-memory store of raw response bodies with TTL expiry driven by a
//! background sweep, plus an optional capacity bound.

mod entry;
mod eviction;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use eviction::InsertionOrder;
pub use stats::{CacheStats, StatsCounters};
pub use store::{RefreshPolicy, ResponseCache};
