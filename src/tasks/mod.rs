//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the cache.
//!
//! # Tasks
//! - TTL Sweep: removes expired cache entries on a fixed period

mod sweep;

pub use sweep::{spawn_sweep_task, SweepHandle};
