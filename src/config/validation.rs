//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoint URLs and the contract address
//! - Validate value ranges (timeouts > 0, 0 < interval <= one year)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClaimerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use alloy::primitives::Address;
use thiserror::Error;
use url::Url;

use crate::config::schema::ClaimerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}' ({reason})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: invalid address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("{field}: must be at most {max}")]
    TooLarge { field: &'static str, max: u64 },
}

/// Upper bound for `schedule.interval_minutes` (one year).
pub const MAX_INTERVAL_MINUTES: u64 = 365 * 24 * 60;

/// Check a loaded configuration for semantic errors.
pub fn validate_config(config: &ClaimerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_http_url("api.base_url", &config.api.base_url, &mut errors);
    check_http_url("chain.rpc_url", &config.chain.rpc_url, &mut errors);

    if config.chain.contract_address.parse::<Address>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "chain.contract_address",
            value: config.chain.contract_address.clone(),
        });
    }

    let non_zero = [
        ("api.request_timeout_secs", config.api.request_timeout_secs),
        ("chain.rpc_timeout_secs", config.chain.rpc_timeout_secs),
        (
            "chain.confirmation_timeout_secs",
            config.chain.confirmation_timeout_secs,
        ),
        ("schedule.interval_minutes", config.schedule.interval_minutes),
    ];
    for (field, value) in non_zero {
        if value == 0 {
            errors.push(ValidationError::Zero { field });
        }
    }

    if config.schedule.interval_minutes > MAX_INTERVAL_MINUTES {
        errors.push(ValidationError::TooLarge {
            field: "schedule.interval_minutes",
            max: MAX_INTERVAL_MINUTES,
        });
    }

    if config.chain.chain_id == Some(0) {
        errors.push(ValidationError::Zero { field: "chain.chain_id" });
    }

    if config.schedule.persist_countdown && config.schedule.checkpoint_path.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "schedule.checkpoint_path",
        });
    }

    if config.wallets.keys_path.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "wallets.keys_path",
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}
