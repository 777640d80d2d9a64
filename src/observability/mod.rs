//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! claim / schedule / api / blockchain:
//!     → logging.rs (structured tracing events, wallet span per claim)
//!     → metrics.rs (outcome counters, cycle gauge)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG or observability.log_level)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Private keys and access tokens never appear in events
//! - Metrics are recorded unconditionally; without an installed exporter they are no-ops

pub mod logging;
pub mod metrics;
