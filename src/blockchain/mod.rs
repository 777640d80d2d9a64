//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! keys.json
//!     → wallet.rs (key loading, address derivation, message signing)
//!
//! RedeemOrder (from the rewards API)
//!     → submitter.rs (build redeem call, sign, broadcast, wait for receipt)
//!     → ClaimResult { tx_hash, block_number, SUCCESS | FAIL }
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod contract;
pub mod submitter;
pub mod types;
pub mod wallet;

pub use submitter::{ChainSubmitter, RedeemSubmitter};
pub use types::{ChainError, ChainId, ClaimResult, ClaimStatus, WalletError};
pub use wallet::Wallet;
