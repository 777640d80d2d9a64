//! Cancellable, checkpointed inter-cycle wait.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::schedule::checkpoint::CheckpointStore;

/// Cadence of the `info` progress line during a wait.
const REPORT_EVERY: Duration = Duration::from_secs(60);

/// How a countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Elapsed,
    /// The stop signal fired before the countdown reached zero.
    Cancelled,
}

/// Waits in fixed ticks, recording the remainder after each one.
#[derive(Debug, Clone)]
pub struct Countdown {
    store: Option<CheckpointStore>,
    tick: Duration,
}

impl Countdown {
    pub fn new(store: Option<CheckpointStore>) -> Self {
        Self {
            store,
            tick: Duration::from_secs(1),
        }
    }

    /// Override the one-second tick.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }

    pub fn store(&self) -> Option<&CheckpointStore> {
        self.store.as_ref()
    }

    /// Wait for `total`, or until `shutdown` fires.
    ///
    /// The checkpoint is deleted when the wait completes and left in place
    /// when it is cancelled.
    pub async fn wait(
        &self,
        total: Duration,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> WaitOutcome {
        let mut remaining = total;
        self.checkpoint(remaining);

        while !remaining.is_zero() {
            let step = remaining.min(self.tick);
            tokio::select! {
                _ = time::sleep(step) => {
                    let elapsed_before = total - remaining;
                    remaining -= step;
                    if !remaining.is_zero() {
                        self.checkpoint(remaining);
                        if crosses_report_mark(elapsed_before, total - remaining, REPORT_EVERY) {
                            tracing::info!(remaining = %format_hms(remaining), "Next cycle in");
                        } else {
                            tracing::trace!(remaining = %format_hms(remaining), "Countdown");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!(
                        remaining = %format_hms(remaining),
                        "Countdown cancelled by stop signal"
                    );
                    return WaitOutcome::Cancelled;
                }
            }
        }

        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                tracing::warn!(error = %e, "Failed to remove countdown checkpoint");
            }
        }
        WaitOutcome::Elapsed
    }

    fn checkpoint(&self, remaining: Duration) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(remaining.as_millis() as u64) {
                tracing::warn!(error = %e, "Failed to write countdown checkpoint");
            }
        }
    }
}

/// Whether advancing from `before` to `after` passes a multiple of `every`.
fn crosses_report_mark(before: Duration, after: Duration, every: Duration) -> bool {
    let every = every.as_millis().max(1);
    after.as_millis() / every > before.as_millis() / every
}

/// Render a duration as `HH:MM:SS`.
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
