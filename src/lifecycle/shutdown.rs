//! Stop signal for the claim loop.
//!
//! The scheduler checks the signal before starting a cycle and races it
//! against every countdown tick. A wallet being processed is never interrupted.

use tokio::sync::broadcast;

/// Stop handle shared by the signal handler and the scheduler.
///
/// Cloning yields another handle on the same channel.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to pass to [`Scheduler::run`](crate::schedule::Scheduler::run).
    ///
    /// Only receivers created before [`trigger`](Self::trigger) observe it.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask the scheduler to stop. A pending countdown is cancelled and its
    /// checkpoint kept.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of live receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
