//! Cancellable interval tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shared cancellation flag with async wake-up.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub async fn cancelled(&self) {
        // Register before checking the flag: a cancel() landing between the
        // check and the await would otherwise find no waiter to wake.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// A closure run on a fixed period until cancelled.
///
/// Dropping the handle cancels the task, so owners never leave a timer
/// running past their own lifetime.
pub struct RecurringTask {
    name: &'static str,
    token: CancelToken,
    handle: Option<JoinHandle<()>>,
}

impl RecurringTask {
    /// Spawn onto the current tokio runtime.
    ///
    /// With `immediate`, the first run happens right away; otherwise after
    /// one full `period`. Ticks missed while a run is slow are skipped.
    /// Each run goes to the blocking pool since ticks may wait on file
    /// locks and disk I/O.
    pub fn spawn<F>(name: &'static str, period: Duration, immediate: bool, tick: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let token = CancelToken::new();
        let task_token = token.clone();
        let tick = Arc::new(tick);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            if !immediate {
                interval.tick().await;
            }
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = interval.tick() => {
                        let tick = Arc::clone(&tick);
                        if let Err(e) = tokio::task::spawn_blocking(move || tick()).await {
                            tracing::warn!(task = name, error = %e, "Recurring task tick failed");
                        }
                    }
                }
            }
            tracing::debug!(task = name, "Recurring task stopped");
        });
        tracing::debug!(task = name, ?period, "Recurring task started");

        Self {
            name,
            token,
            handle: Some(handle),
        }
    }

    /// Cancel and wait for the loop to exit.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(task = self.name, error = %e, "Recurring task ended abnormally");
            }
        }
    }
}

impl Drop for RecurringTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
