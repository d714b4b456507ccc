//! Cache Entry Module
//!
//! Defines a single stored response body and the time it was last written.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A cached response body with its insertion/refresh timestamp.
///
/// `Bytes` clones share the underlying buffer, so handing a payload out of the
/// cache never gives the caller a mutable alias into the store.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response body
    pub payload: Bytes,
    /// Time of insertion or last refresh
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(payload: Bytes) -> Self {
        Self::new_at(payload, Instant::now())
    }

    /// Creates a new entry stamped with an explicit time.
    pub fn new_at(payload: Bytes, created_at: Instant) -> Self {
        Self {
            payload,
            created_at,
        }
    }

    // == Refresh ==
    /// Resets the timestamp to `now`.
    ///
    /// The timestamp never moves backwards, even if `now` is earlier than the
    /// stored value.
    pub fn touch(&mut self, now: Instant) {
        if now > self.created_at {
            self.created_at = now;
        }
    }

    /// Replaces the payload and resets the timestamp to `now`.
    pub fn replace(&mut self, payload: Bytes, now: Instant) {
        self.payload = payload;
        self.touch(now);
    }

    // == Is Expired ==
    /// Checks whether the entry is due for removal at `now`.
    ///
    /// Boundary condition: an entry whose `created_at + ttl` equals `now` is
    /// already expired. A deadline past the clock's range never arrives.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        self.created_at
            .checked_add(ttl)
            .map_or(false, |deadline| deadline <= now)
    }
}
