//! Wallet management and message signing.
//!
//! # Security
//! - Keys are never logged or serialized
//! - `Debug` only shows the derived address

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::{hex, Address};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, Signer};
use serde::{Deserialize, Serialize};

use crate::blockchain::types::{WalletError, WalletResult};

/// The challenge the rewards API expects to be signed on connect.
///
/// Field order matters: the serialized form is what gets signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeMessage {
    pub wallet_address: String,
    pub timestamp: u64,
}

impl ChallengeMessage {
    /// Compact JSON, e.g. `{"wallet_address":"0xAb…","timestamp":1700000000}`.
    pub fn to_canonical_json(&self) -> String {
        // Serializing two plain fields cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// A challenge together with its personal-sign signature.
#[derive(Debug, Clone)]
pub struct SignedChallenge {
    pub message: ChallengeMessage,
    /// `0x`-prefixed 65-byte signature, `v` in {27, 28}.
    pub signature: String,
}

/// A wallet loaded from a private key.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// Accepts keys with or without the `0x` prefix.
    pub fn from_private_key(private_key_hex: &str) -> WalletResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| WalletError::InvalidKey(format!("Invalid private key format: {}", e)))?;

        tracing::debug!(address = %signer.address(), "Wallet loaded");

        Ok(Self { signer })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// EIP-55 checksummed address string.
    pub fn address_string(&self) -> String {
        self.address().to_checksum(None)
    }

    pub(crate) fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Sign arbitrary message bytes (with Ethereum prefix).
    pub async fn sign_message(&self, message: &[u8]) -> WalletResult<Signature> {
        self.signer
            .sign_message(message)
            .await
            .map_err(|e| WalletError::Signing(format!("Message signing failed: {}", e)))
    }

    /// Build and sign the connect-wallet challenge for `timestamp`.
    pub async fn sign_challenge(&self, timestamp: u64) -> WalletResult<SignedChallenge> {
        let message = ChallengeMessage {
            wallet_address: self.address_string(),
            timestamp,
        };
        let signature = self
            .sign_message(message.to_canonical_json().as_bytes())
            .await?;

        Ok(SignedChallenge {
            message,
            signature: hex::encode_prefixed(signature.as_bytes()),
        })
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Derive the address for a private key without keeping the wallet.
pub fn derive_address(private_key_hex: &str) -> WalletResult<Address> {
    Wallet::from_private_key(private_key_hex).map(|w| w.address())
}

/// Current Unix time in seconds.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
