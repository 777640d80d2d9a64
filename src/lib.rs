//! Multi-wallet Gaia credits reward claimer.
//!
//! For every configured wallet: authenticate against the rewards API with a
//! signed challenge, check today's redeemable points, request a server-signed
//! voucher and submit it to the redeem contract. Cycles repeat on a fixed
//! interval with a restart-safe countdown.

// Core subsystems
pub mod api;
pub mod blockchain;
pub mod claim;
pub mod config;
pub mod schedule;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use api::{RewardApi, RewardClient};
pub use blockchain::{ChainSubmitter, RedeemSubmitter, Wallet};
pub use claim::{CycleReport, Orchestrator, WalletOutcome};
pub use config::ClaimerConfig;
pub use lifecycle::Shutdown;
pub use schedule::Scheduler;
