//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries,
//! independent of lookup and insert traffic.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::ResponseCache;

/// Shortest accepted sweep period.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

// == Sweep Handle ==
/// Owner of a running sweep task.
///
/// Call [`SweepHandle::stop`] to shut the task down and wait for it. Dropping
/// the handle signals the task to stop without waiting.
#[derive(Debug)]
pub struct SweepHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SweepHandle {
    /// Signals the task to stop and waits until it has exited.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!("Sweep task ended abnormally: {}", err);
            }
        }
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// Spawns a background task that sweeps expired entries from `cache` every
/// `interval`.
///
/// The first sweep happens one full interval after spawning. A tick that
/// falls behind (for example while the sweep waits on the cache lock) is
/// delayed rather than replayed in a burst.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(ResponseCache::new(Duration::from_secs(5)));
/// let sweeper = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.stop().await;
/// ```
pub fn spawn_sweep_task(cache: Arc<ResponseCache>, interval: Duration) -> SweepHandle {
    let interval = interval.max(MIN_SWEEP_INTERVAL);
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!(
            "Starting TTL sweep task: interval={:?}, ttl={:?}",
            interval,
            cache.ttl()
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = cache.sweep_expired().await;
                    if removed > 0 {
                        info!("TTL sweep: removed {} expired entries", removed);
                    } else {
                        debug!("TTL sweep: no expired entries found");
                    }
                }
                changed = shutdown_rx.changed() => {
                    // A closed channel means the handle is gone
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("TTL sweep task stopped");
    });

    SweepHandle {
        shutdown,
        task: Some(task),
    }
}
