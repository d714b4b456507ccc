//! Fetcher Facade
//!
//! Makes upstream retrieval cache-transparent: the full resource address is
//! the cache key, a hit never touches the upstream, a successful miss is
//! stored before being returned.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::error::{FetchError, Result};
use crate::fetch::Upstream;

// == Fetcher ==
/// Cache-fronted access to an upstream source.
///
/// Concurrent misses on the same key are not coalesced: each caller goes to
/// the upstream and each successful result is written to the cache.
#[derive(Clone)]
pub struct Fetcher {
    cache: Arc<ResponseCache>,
    upstream: Arc<dyn Upstream>,
}

impl Fetcher {
    /// Creates a fetcher over a shared cache and upstream.
    pub fn new(cache: Arc<ResponseCache>, upstream: Arc<dyn Upstream>) -> Self {
        Self { cache, upstream }
    }

    /// Derives the cache key for a resource address.
    pub fn cache_key(address: &str) -> &str {
        address.trim()
    }

    // == Fetch ==
    /// Returns the raw body for `address`, from the cache when present.
    ///
    /// A cached entry is returned even if it has outlived its TTL but has not
    /// been swept yet. Upstream failures are propagated and never cached.
    pub async fn fetch(&self, address: &str) -> Result<Bytes> {
        let key = Self::cache_key(address);

        if let Some(cached) = self.cache.get(key).await {
            return Ok(cached);
        }

        debug!(address = %key, "Fetching from upstream");
        match self.upstream.retrieve(key).await {
            Ok(body) => {
                self.cache.add(key, body.clone()).await;
                Ok(body)
            }
            Err(err) => {
                warn!(address = %key, error = %err, "Upstream fetch failed");
                Err(err)
            }
        }
    }

    /// Fetches `address` and decodes the body as JSON.
    ///
    /// A body that fails to decode is still cached, since the upstream call
    /// itself succeeded; the caller gets `MalformedPayload`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, address: &str) -> Result<T> {
        let body = self.fetch(address).await?;
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::MalformedPayload(format!("{}: {}", address, err)))
    }

    /// Returns the cache behind this fetcher.
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }
}
