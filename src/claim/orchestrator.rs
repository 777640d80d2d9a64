//! Per-wallet claim flow.
//!
//! # Flow
//! ```text
//! check_eligibility:  connect-wallet → preview ──(0 points)──▶ SKIPPED
//!                                        │
//! claim_wallet:       connect-wallet → preview → create order → redeem → receipt
//! ```
//!
//! The main path re-authenticates and re-reads the preview, so the order always
//! carries the latest point count rather than the one seen during the check.

use tracing::Instrument;

use crate::api::client::RewardApi;
use crate::blockchain::submitter::ChainSubmitter;
use crate::blockchain::types::ClaimStatus;
use crate::blockchain::wallet::Wallet;
use crate::claim::outcome::{
    ClaimError, CycleReport, Eligibility, SkipReason, WalletOutcome, WalletReport,
};
use crate::observability::metrics;

/// Drives one pass over the configured wallets.
pub struct Orchestrator<A, C> {
    wallets: Vec<Wallet>,
    api: A,
    chain: C,
}

impl<A: RewardApi, C: ChainSubmitter> Orchestrator<A, C> {
    pub fn new(wallets: Vec<Wallet>, api: A, chain: C) -> Self {
        Self {
            wallets,
            api,
            chain,
        }
    }

    /// Wallets in processing order.
    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Authenticate and read today's redeemable points.
    ///
    /// Never fails: any error becomes [`SkipReason::CheckFailed`].
    pub async fn check_eligibility(&self, wallet: &Wallet) -> Eligibility {
        let points = async {
            let token = self.api.connect_wallet(wallet).await?;
            self.api.preview_redeemable(&token).await
        }
        .await;

        match points {
            Ok(0) => Eligibility::Skipped(SkipReason::NoPoints),
            Ok(points) => Eligibility::Eligible(points),
            Err(e) => Eligibility::Skipped(SkipReason::CheckFailed(e.to_string())),
        }
    }

    /// Run the main claim path for one wallet.
    ///
    /// Uses a fresh token and a fresh preview. A zero preview skips the wallet
    /// without creating an order.
    pub async fn claim_wallet(&self, wallet: &Wallet) -> Result<WalletOutcome, ClaimError> {
        let token = self.api.connect_wallet(wallet).await?;
        let points = self.api.preview_redeemable(&token).await?;
        if points == 0 {
            return Ok(WalletOutcome::Skipped(SkipReason::NoPoints));
        }

        tracing::info!(points, "Creating redeem order");
        let order = self.api.create_redeem_order(&token, points).await?;
        tracing::debug!(order_id = %order.id, amount = %order.amount, "Redeem order created");

        let result = self.chain.redeem(wallet, &order).await?;
        Ok(WalletOutcome::Claimed(result))
    }

    /// Check and claim one wallet. Errors are logged and folded into the outcome.
    pub async fn process_wallet(&self, index: usize, wallet: &Wallet) -> WalletOutcome {
        let total = self.wallets.len();
        let address = wallet.address_string();
        let span = tracing::info_span!("wallet", n = index + 1, total, address = %address);

        let outcome = async {
            tracing::info!("[{}/{}] {} Checking eligibility", index + 1, total, address);

            let points = match self.check_eligibility(wallet).await {
                Eligibility::Eligible(points) => points,
                Eligibility::Skipped(reason) => {
                    match &reason {
                        SkipReason::NoPoints => tracing::info!("No claimable points, skipping"),
                        SkipReason::CheckFailed(e) => {
                            tracing::warn!(error = %e, "Eligibility check failed, skipping")
                        }
                    }
                    return WalletOutcome::Skipped(reason);
                }
            };
            tracing::info!(points, "Wallet eligible");

            match self.claim_wallet(wallet).await {
                Ok(WalletOutcome::Claimed(result)) => {
                    match result.status {
                        ClaimStatus::Success => tracing::info!(
                            tx_hash = %result.tx_hash,
                            block_number = result.block_number,
                            "Claim SUCCESS"
                        ),
                        ClaimStatus::Fail => tracing::error!(
                            tx_hash = %result.tx_hash,
                            block_number = result.block_number,
                            "Claim FAIL: transaction reverted"
                        ),
                    }
                    WalletOutcome::Claimed(result)
                }
                Ok(outcome) => {
                    tracing::info!("Points were claimed elsewhere since the check, skipping");
                    outcome
                }
                Err(e) => {
                    tracing::error!(error = %e, "Claim ERROR");
                    WalletOutcome::Failed(e.to_string())
                }
            }
        }
        .instrument(span)
        .await;

        metrics::record_wallet_outcome(&outcome);
        outcome
    }

    /// Process every wallet once, strictly in order.
    pub async fn run_cycle(&self) -> CycleReport {
        tracing::info!(wallets = self.wallets.len(), "Starting claim cycle");

        let mut report = CycleReport::default();
        for (index, wallet) in self.wallets.iter().enumerate() {
            let outcome = self.process_wallet(index, wallet).await;
            report.wallets.push(WalletReport {
                index,
                address: wallet.address(),
                outcome,
            });
        }

        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            skipped = report.skipped(),
            "Claim cycle complete"
        );
        metrics::record_cycle(&report);

        report
    }
}
