//! Response Cache Module
//!
//! Main cache engine: a HashMap of raw response bodies behind a reader/writer
//! lock, expired by a periodic sweep rather than on lookup.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder, StatsCounters};
use crate::config::Config;
use crate::tasks::{spawn_sweep_task, SweepHandle};

// == Refresh Policy ==
/// What `add` does when the key is already present.
///
/// Both variants reset the entry timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Store the new payload and reset the timestamp.
    #[default]
    ReplacePayload,
    /// Keep the original payload, only reset the timestamp.
    TouchOnly,
}

impl FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" | "replace-payload" => Ok(Self::ReplacePayload),
            "touch" | "touch-only" => Ok(Self::TouchOnly),
            other => Err(format!(
                "unknown refresh policy '{}', expected 'replace' or 'touch'",
                other
            )),
        }
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReplacePayload => f.write_str("replace"),
            Self::TouchOnly => f.write_str("touch"),
        }
    }
}

// == Store State ==
/// Everything guarded by the cache lock.
#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, CacheEntry>,
    /// Present only when a capacity bound is configured
    order: Option<InsertionOrder>,
}

// == Response Cache ==
/// Thread-safe store of raw response bodies with time-based expiry.
///
/// Lookups take a shared lock; writes and the sweep take the exclusive lock.
/// Neither `get` nor `add` ever removes an expired entry: only the sweep does,
/// so an entry may be served for up to one sweep period past its TTL.
#[derive(Debug)]
pub struct ResponseCache {
    entries: RwLock<Entries>,
    ttl: Duration,
    policy: RefreshPolicy,
    max_entries: Option<usize>,
    stats: StatsCounters,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an unbounded cache with the given TTL and the default
    /// refresh policy.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            ttl,
            policy: RefreshPolicy::default(),
            max_entries: None,
            stats: StatsCounters::new(),
        }
    }

    /// Creates a cache from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = Self::new(config.ttl()).with_refresh_policy(config.refresh_policy);
        match config.max_entries {
            Some(max) => cache.with_max_entries(max),
            None => cache,
        }
    }

    /// Sets the behaviour of `add` on an existing key.
    pub fn with_refresh_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bounds the number of entries, evicting the least recently added key
    /// when a new key would exceed the bound. A bound of zero is treated as one.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self.entries.get_mut().order = Some(InsertionOrder::new());
        self
    }

    // == Spawn ==
    /// Shares the cache and starts its background sweep.
    ///
    /// The sweep runs until the returned handle is stopped or dropped.
    pub fn spawn(self, sweep_interval: Duration) -> (Arc<Self>, SweepHandle) {
        let cache = Arc::new(self);
        let handle = spawn_sweep_task(cache.clone(), sweep_interval);
        (cache, handle)
    }

    // == Add ==
    /// Inserts a payload, or refreshes the entry if the key already exists.
    ///
    /// A refresh always resets the timestamp; whether the payload is replaced
    /// depends on the configured `RefreshPolicy`.
    pub async fn add(&self, key: impl Into<String>, payload: impl Into<Bytes>) {
        let key = key.into();
        debug_assert!(!key.is_empty(), "cache keys must not be empty");
        let payload = payload.into();

        let mut guard = self.entries.write().await;
        let Entries { map, order } = &mut *guard;
        let now = Instant::now();

        if let Some(entry) = map.get_mut(&key) {
            match self.policy {
                RefreshPolicy::ReplacePayload => entry.replace(payload, now),
                RefreshPolicy::TouchOnly => entry.touch(now),
            }
            debug!(key = %key, policy = %self.policy, "Cache entry refreshed");
        } else {
            if let (Some(max), Some(order)) = (self.max_entries, order.as_mut()) {
                while map.len() >= max {
                    let Some(oldest) = order.evict_oldest() else {
                        break;
                    };
                    map.remove(&oldest);
                    self.stats.record_eviction();
                    debug!(key = %oldest, "Cache entry evicted at capacity");
                }
            }
            map.insert(key.clone(), CacheEntry::new_at(payload, now));
            debug!(key = %key, "Cache entry added");
        }

        if let Some(order) = order.as_mut() {
            order.record_write(&key);
        }
    }

    // == Get ==
    /// Looks up a payload by key.
    ///
    /// Returns the stored bytes whether or not the entry has outlived its TTL;
    /// expiry is the sweep's job.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        let guard = self.entries.read().await;
        match guard.map.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                debug!(key = %key, "Cache hit");
                Some(entry.payload.clone())
            }
            None => {
                self.stats.record_miss();
                debug!(key = %key, "Cache miss");
                None
            }
        }
    }

    // == Sweep Expired ==
    /// Removes every entry whose age has reached the TTL.
    ///
    /// Returns the number of entries removed.
    pub async fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Instant::now()).await
    }

    /// Removes every entry that is expired as of `now`.
    pub async fn sweep_expired_at(&self, now: Instant) -> usize {
        let mut guard = self.entries.write().await;
        let Entries { map, order } = &mut *guard;
        let before = map.len();

        map.retain(|key, entry| {
            let expired = entry.is_expired_at(now, self.ttl);
            if expired {
                if let Some(order) = order.as_mut() {
                    order.remove(key);
                }
            }
            !expired
        });

        let removed = before - map.len();
        self.stats.record_swept(removed);
        removed
    }

    // == Accessors ==
    /// Returns the fixed time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn refresh_policy(&self) -> RefreshPolicy {
        self.policy
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Returns the current number of entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.map.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let total = self.len().await;
        self.stats.snapshot(total)
    }
}
