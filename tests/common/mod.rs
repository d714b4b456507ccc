//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use pokedex_cache::{FetchError, Upstream};

/// Upstream serving canned bodies, counting calls per address.
#[derive(Default)]
pub struct MockUpstream {
    bodies: HashMap<String, Result<Bytes, FetchError>>,
    calls: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, address: &str, body: &str) -> Self {
        self.bodies
            .insert(address.to_string(), Ok(Bytes::copy_from_slice(body.as_bytes())));
        self
    }

    pub fn with_error(mut self, address: &str, err: FetchError) -> Self {
        self.bodies.insert(address.to_string(), Err(err));
        self
    }

    pub fn calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, address: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(address)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    async fn retrieve(&self, address: &str) -> Result<Bytes, FetchError> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self
            .calls
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_default() += 1;

        self.bodies
            .get(address)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound(address.to_string())))
    }
}
