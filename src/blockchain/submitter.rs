//! Voucher submission to the redeem contract.
//!
//! # Responsibilities
//! - Connect a wallet-filling provider to the configured RPC
//! - Verify the chain ID when one is configured
//! - Send `redeem(orderId, amount, timestamp, signature)` and wait for the receipt
//! - Map the receipt status to [`ClaimStatus`]

use std::future::Future;
use std::time::Duration;

use alloy::network::{EthereumWallet, ReceiptResponse};
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use async_trait::async_trait;
use tokio::time::timeout;
use url::Url;

use crate::api::types::RedeemOrder;
use crate::blockchain::contract::IGaiaRedeem;
use crate::blockchain::types::{ChainError, ChainId, ChainResult, ClaimResult, ClaimStatus};
use crate::blockchain::wallet::Wallet;
use crate::config::ChainConfig;

/// Submits redeem vouchers on behalf of a wallet.
#[async_trait]
pub trait ChainSubmitter: Send + Sync {
    /// Send the voucher as a transaction signed by `wallet` and wait until it is mined.
    ///
    /// A reverted transaction is returned as `Ok` with [`ClaimStatus::Fail`].
    async fn redeem(&self, wallet: &Wallet, order: &RedeemOrder) -> ChainResult<ClaimResult>;
}

/// [`ChainSubmitter`] backed by a JSON-RPC endpoint.
#[derive(Clone)]
pub struct RedeemSubmitter {
    rpc_url: Url,
    contract_address: Address,
    expected_chain_id: Option<ChainId>,
    rpc_timeout: Duration,
    confirmation_timeout: Duration,
}

impl RedeemSubmitter {
    /// Create a submitter from chain configuration.
    pub fn new(config: &ChainConfig) -> ChainResult<Self> {
        let rpc_url: Url = config.rpc_url.parse().map_err(|e| {
            ChainError::Config(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let contract_address: Address = config.contract_address.parse().map_err(|e| {
            ChainError::Config(format!(
                "Invalid contract address '{}': {}",
                config.contract_address, e
            ))
        })?;

        Ok(Self {
            rpc_url,
            contract_address,
            expected_chain_id: config.chain_id.map(ChainId),
            rpc_timeout: Duration::from_secs(config.rpc_timeout_secs),
            confirmation_timeout: Duration::from_secs(config.confirmation_timeout_secs),
        })
    }

    /// The redeem contract this submitter calls.
    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    async fn rpc<T, E, F>(&self, fut: F) -> ChainResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.rpc_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ChainError::Submission(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.rpc_timeout.as_secs())),
        }
    }
}

impl std::fmt::Debug for RedeemSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedeemSubmitter")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("contract_address", &self.contract_address)
            .field("chain_id", &self.expected_chain_id)
            .finish()
    }
}

#[async_trait]
impl ChainSubmitter for RedeemSubmitter {
    async fn redeem(&self, wallet: &Wallet, order: &RedeemOrder) -> ChainResult<ClaimResult> {
        let signature = decode_voucher_signature(&order.signature)?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(wallet.signer().clone()))
            .connect_http(self.rpc_url.clone());

        if let Some(expected) = self.expected_chain_id {
            let actual = self.rpc(provider.get_chain_id()).await?;
            if actual != expected.0 {
                return Err(ChainError::ChainMismatch {
                    expected: expected.0,
                    actual,
                });
            }
        }

        let contract = IGaiaRedeem::new(self.contract_address, provider);
        let call = contract.redeem(
            order.id.clone(),
            order.amount,
            U256::from(order.timestamp),
            signature,
        );

        let pending = self.rpc(call.send()).await?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(
            tx_hash = %tx_hash,
            order_id = %order.id,
            "Redeem transaction sent, waiting for receipt"
        );

        let receipt = match timeout(self.confirmation_timeout, pending.get_receipt()).await {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(e)) => {
                return Err(ChainError::Confirmation {
                    tx_hash,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(ChainError::Confirmation {
                    tx_hash,
                    reason: format!(
                        "no receipt after {} seconds",
                        self.confirmation_timeout.as_secs()
                    ),
                })
            }
        };

        let status = ClaimStatus::from_status_code(u64::from(ReceiptResponse::status(&receipt)));
        let block_number = ReceiptResponse::block_number(&receipt).unwrap_or_default();

        tracing::debug!(tx_hash = %tx_hash, block_number, status = %status, "Receipt received");

        Ok(ClaimResult {
            tx_hash,
            block_number,
            status,
        })
    }
}

/// Decode the hex voucher signature issued by the rewards API.
pub fn decode_voucher_signature(signature: &str) -> ChainResult<Bytes> {
    let bytes: Bytes = signature
        .trim()
        .parse()
        .map_err(|e| ChainError::InvalidOrder(format!("signature is not valid hex: {}", e)))?;
    if bytes.is_empty() {
        return Err(ChainError::InvalidOrder("signature is empty".to_string()));
    }
    Ok(bytes)
}
