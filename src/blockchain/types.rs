//! Chain-specific types and error definitions.

use std::fmt;

use alloy::primitives::TxHash;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors raised by key handling and message signing.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Invalid private key format or derivation error.
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// The signer refused or failed to sign.
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

/// Errors that can occur while submitting a voucher on-chain.
///
/// A transaction that is mined but reverts is not an error; it comes back as
/// a [`ClaimResult`] with [`ClaimStatus::Fail`].
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC or signing failure before the transaction was mined.
    #[error("Transaction submission failed: {0}")]
    Submission(String),

    /// The receipt could not be obtained.
    #[error("Confirmation failed for {tx_hash}: {reason}")]
    Confirmation { tx_hash: TxHash, reason: String },

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The voucher returned by the rewards API cannot be encoded.
    #[error("Invalid redeem order: {0}")]
    InvalidOrder(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Bad RPC URL or contract address.
    #[error("Invalid chain configuration: {0}")]
    Config(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Outcome of a mined redeem transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    Success,
    Fail,
}

impl ClaimStatus {
    /// Map a receipt status code. Only `1` is success.
    pub fn from_status_code(code: u64) -> Self {
        if code == 1 {
            ClaimStatus::Success
        } else {
            ClaimStatus::Fail
        }
    }

    pub fn is_success(self) -> bool {
        self == ClaimStatus::Success
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClaimStatus::Success => "SUCCESS",
            ClaimStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receipt summary for one redeem transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimResult {
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub status: ClaimStatus,
}
