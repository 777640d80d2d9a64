//! Claim orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! Orchestrator::run_cycle
//!     → for each wallet, in order:
//!         check_eligibility (api) ──▶ Skipped(NoPoints | CheckFailed)
//!         claim_wallet (api + blockchain) ──▶ Claimed(SUCCESS | FAIL) | Failed
//!     → CycleReport
//! ```
//!
//! # Design Decisions
//! - Wallets are processed one at a time; a wallet's error ends at its own boundary
//! - The orchestrator only sees the [`RewardApi`](crate::api::RewardApi) and
//!   [`ChainSubmitter`](crate::blockchain::ChainSubmitter) traits

pub mod orchestrator;
pub mod outcome;

#[cfg(test)]
pub(crate) mod testing;

pub use orchestrator::Orchestrator;
pub use outcome::{ClaimError, CycleReport, Eligibility, SkipReason, WalletOutcome, WalletReport};
