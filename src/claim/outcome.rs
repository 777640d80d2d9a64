//! Per-wallet and per-cycle outcomes.

use std::fmt;

use alloy::primitives::Address;
use thiserror::Error;

use crate::api::types::ApiError;
use crate::blockchain::types::{ChainError, ClaimResult, ClaimStatus, WalletError};

/// Errors that end one wallet's main claim path.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// Why a wallet was not claimed this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The preview reported zero redeemable points.
    NoPoints,
    /// Authentication or preview failed during the eligibility check.
    CheckFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoPoints => f.write_str("no claimable points"),
            SkipReason::CheckFailed(reason) => write!(f, "eligibility check failed: {}", reason),
        }
    }
}

/// Result of the eligibility pre-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible(u64),
    Skipped(SkipReason),
}

/// What happened to one wallet in one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletOutcome {
    /// A redeem transaction was mined; its status may still be `FAIL`.
    Claimed(ClaimResult),
    Skipped(SkipReason),
    /// The main path raised an error.
    Failed(String),
}

impl WalletOutcome {
    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            WalletOutcome::Claimed(result) => result.status.as_str(),
            WalletOutcome::Skipped(_) => "SKIPPED",
            WalletOutcome::Failed(_) => "ERROR",
        }
    }
}

/// Outcome of one wallet within a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletReport {
    /// Zero-based position in the configured wallet list.
    pub index: usize,
    pub address: Address,
    pub outcome: WalletOutcome,
}

/// Every wallet's outcome for one pass over the wallet list, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub wallets: Vec<WalletReport>,
}

impl CycleReport {
    pub fn labels(&self) -> Vec<&'static str> {
        self.wallets.iter().map(|w| w.outcome.label()).collect()
    }

    /// Wallets whose redeem transaction succeeded.
    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, WalletOutcome::Claimed(r) if r.status == ClaimStatus::Success))
    }

    /// Wallets with a reverted transaction or a main-path error.
    pub fn failed(&self) -> usize {
        self.count(|o| match o {
            WalletOutcome::Claimed(r) => r.status == ClaimStatus::Fail,
            WalletOutcome::Failed(_) => true,
            WalletOutcome::Skipped(_) => false,
        })
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, WalletOutcome::Skipped(_)))
    }

    fn count(&self, pred: impl Fn(&WalletOutcome) -> bool) -> usize {
        self.wallets.iter().filter(|w| pred(&w.outcome)).count()
    }
}
