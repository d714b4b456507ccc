//! Capacity Eviction Module
//!
//! Optional capacity bound for the response cache. Disabled unless the cache is
//! built with a maximum entry count; TTL expiry works the same either way.
//!
//! The policy is least-recently-added: every write (insert or refresh) moves
//! the key to the newest position, reads never reorder.

use std::collections::VecDeque;

// == Insertion Order ==
/// Tracks write order for capacity eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Oldest write
/// - Back = Newest write
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record Write ==
    /// Marks a key as the most recently written.
    pub fn record_write(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Stops tracking a key.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and forgets the least recently written key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }
}
