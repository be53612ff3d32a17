//! Periodic cleanup of the memory tier
//!
//! A tokio task that, every interval, purges expired memory items and
//! re-enforces the capacity bound. It runs independently of request traffic
//! and stops through a `CancellationToken`.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tiercache_application::CacheCoordinator;
use tiercache_domain::CleanupReport;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

struct RunningTask {
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Background cleanup scheduler
pub struct CleanupScheduler {
    cache: Arc<CacheCoordinator>,
    interval: Duration,
    running: Mutex<Option<RunningTask>>,
}

impl CleanupScheduler {
    /// Create a scheduler sweeping `cache` every `interval`
    pub fn new(cache: Arc<CacheCoordinator>, interval: Duration) -> Self {
        Self {
            cache,
            interval: interval.max(Duration::from_millis(1)),
            running: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<RunningTask>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sweep interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the background task is running
    pub fn is_running(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }

    /// Spawn the background task; a no-op when already running
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        let mut running = self.lock();
        if running
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
        {
            return;
        }

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(cleanup_loop(
            Arc::clone(&self.cache),
            self.interval,
            cancel_token.clone(),
        ));
        *running = Some(RunningTask {
            cancel_token,
            handle,
        });
    }

    /// Stop the background task and wait for it to finish
    pub async fn stop(&self) {
        let Some(task) = self.lock().take() else {
            return;
        };
        task.cancel_token.cancel();
        if let Err(e) = task.handle.await {
            error!(error = %e, "cache cleanup task ended abnormally");
        }
    }

    /// Run one sweep immediately
    pub fn run_once(&self) -> Option<CleanupReport> {
        run_cycle(&self.cache)
    }
}

impl std::fmt::Debug for CleanupScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupScheduler")
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl Drop for CleanupScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.lock().take() {
            task.cancel_token.cancel();
        }
    }
}

async fn cleanup_loop(cache: Arc<CacheCoordinator>, interval: Duration, cancel_token: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    info!(interval_secs = interval.as_secs_f64(), "cache cleanup scheduler started");
    loop {
        tokio::select! {
            () = cancel_token.cancelled() => break,
            _ = ticker.tick() => {
                run_cycle(&cache);
            }
        }
    }
    info!("cache cleanup scheduler stopped");
}

/// One sweep; a panicking sweep is logged and the loop keeps going
fn run_cycle(cache: &CacheCoordinator) -> Option<CleanupReport> {
    match std::panic::catch_unwind(AssertUnwindSafe(|| cache.run_cleanup())) {
        Ok(report) => {
            if report.total() > 0 {
                info!(
                    expired = report.expired,
                    evicted = report.evicted,
                    "cache cleanup removed items"
                );
            } else {
                debug!("cache cleanup found nothing to remove");
            }
            Some(report)
        }
        Err(_) => {
            error!("cache cleanup cycle panicked");
            None
        }
    }
}
