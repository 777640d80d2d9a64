//! Scheduling subsystem.
//!
//! # Data Flow
//! ```text
//! startup → checkpoint.rs (resume an interrupted wait, if any)
//!     → run_cycle → countdown.rs (tick, checkpoint remaining_ms) → run_cycle → ...
//!
//! stop signal → countdown cancelled, checkpoint kept → scheduler returns
//! ```

pub mod checkpoint;
pub mod countdown;
pub mod scheduler;

pub use checkpoint::{resume_duration, CheckpointStore};
pub use countdown::{Countdown, WaitOutcome};
pub use scheduler::Scheduler;
