//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → scheduler stops between cycles or cancels its countdown
//! ```
//!
//! # Design Decisions
//! - No drain phase: the only durable state is the countdown checkpoint
//! - A cycle in progress is allowed to finish

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::spawn_signal_handler;
