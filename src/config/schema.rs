//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the claimer.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the credit claimer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClaimerConfig {
    /// Rewards API endpoint settings.
    pub api: ApiConfig,

    /// Chain and redeem contract settings.
    pub chain: ChainConfig,

    /// Cycle interval and countdown persistence.
    pub schedule: ScheduleConfig,

    /// Where the wallet keys come from.
    pub wallets: WalletsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Rewards API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.gaianet.ai/api/v1".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Chain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Address of the redeem contract.
    pub contract_address: String,

    /// Expected chain ID. When set, the RPC is checked before submitting.
    pub chain_id: Option<u64>,

    /// Timeout for RPC calls made while building and sending a transaction.
    pub rpc_timeout_secs: u64,

    /// Maximum time to wait for a receipt after broadcast.
    pub confirmation_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://mainnet.base.org".to_string(),
            contract_address: "0x1A07595aF2FD14C495096ef5E50616D5Ea09B36D".to_string(),
            chain_id: None,
            rpc_timeout_secs: 30,
            confirmation_timeout_secs: 300,
        }
    }
}

/// Cycle scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Minutes to wait between the end of one cycle and the start of the next.
    pub interval_minutes: u64,

    /// Persist the remaining wait so a restarted process resumes it.
    pub persist_countdown: bool,

    /// Countdown checkpoint file.
    pub checkpoint_path: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 720,
            persist_countdown: true,
            checkpoint_path: "countdown.json".to_string(),
        }
    }
}

/// Wallet key source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletsConfig {
    /// JSON file holding an array of hex private keys.
    pub keys_path: String,
}

impl Default for WalletsConfig {
    fn default() -> Self {
        Self {
            keys_path: "keys.json".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
