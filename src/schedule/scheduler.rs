//! Periodic claim loop.

use std::time::Duration;

use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::api::client::RewardApi;
use crate::blockchain::submitter::ChainSubmitter;
use crate::claim::{CycleReport, Orchestrator};
use crate::config::ScheduleConfig;
use crate::schedule::checkpoint::{resume_duration, CheckpointStore};
use crate::schedule::countdown::{format_hms, Countdown, WaitOutcome};

/// Runs claim cycles separated by a fixed interval.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    countdown: Countdown,
}

impl Scheduler {
    pub fn new(config: &ScheduleConfig) -> Self {
        let store = config
            .persist_countdown
            .then(|| CheckpointStore::new(&config.checkpoint_path));

        Self {
            interval: Duration::from_secs(config.interval_minutes.saturating_mul(60)),
            countdown: Countdown::new(store),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.countdown = self.countdown.with_tick(tick);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Loop until the stop signal fires. Returns the number of cycles run.
    ///
    /// A wait interrupted by a previous process is resumed before the first
    /// cycle. A cycle in progress always finishes.
    pub async fn run<A, C>(
        &self,
        orchestrator: &Orchestrator<A, C>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> usize
    where
        A: RewardApi,
        C: ChainSubmitter,
    {
        let mut cycles = 0;

        if let Some(store) = self.countdown.store() {
            if matches!(store.load(), Ok(Some(ms)) if ms > 0) {
                let remaining = resume_duration(store, self.interval);
                tracing::info!(
                    next_cycle_in = %format_hms(remaining),
                    "Resuming interrupted wait"
                );
                if self.countdown.wait(remaining, &mut shutdown).await == WaitOutcome::Cancelled {
                    return cycles;
                }
            }
        }

        loop {
            if stop_requested(&mut shutdown) {
                tracing::info!("Stop signal received, scheduler exiting");
                break;
            }

            orchestrator.run_cycle().await;
            cycles += 1;

            tracing::info!(
                next_cycle_in = %format_hms(self.interval),
                "Waiting for next cycle"
            );
            if self.countdown.wait(self.interval, &mut shutdown).await == WaitOutcome::Cancelled {
                break;
            }
        }

        cycles
    }

    /// Run a single cycle without waiting.
    pub async fn run_once<A, C>(&self, orchestrator: &Orchestrator<A, C>) -> CycleReport
    where
        A: RewardApi,
        C: ChainSubmitter,
    {
        orchestrator.run_cycle().await
    }
}

fn stop_requested(shutdown: &mut broadcast::Receiver<()>) -> bool {
    !matches!(shutdown.try_recv(), Err(TryRecvError::Empty))
}
