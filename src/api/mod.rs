//! Rewards API subsystem.
//!
//! # Data Flow
//! ```text
//! Wallet
//!     → client.rs connect_wallet (signed challenge → AuthToken)
//!     → client.rs preview_redeemable (AuthToken → points)
//!     → client.rs create_redeem_order (AuthToken, points → RedeemOrder)
//! ```
//!
//! # Design Decisions
//! - Every response is a `{code, msg, data}` envelope; `code != 0` is a
//!   service-level failure even on HTTP 200
//! - Tokens are never cached; each claim attempt connects again

pub mod client;
pub mod types;

pub use client::{RewardApi, RewardClient};
pub use types::{ApiError, ApiResult, AuthToken, RedeemOrder};
