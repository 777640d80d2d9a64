//! Rewards API wire types and error definitions.

use std::fmt;

use alloy::primitives::U256;
use reqwest::StatusCode;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::types::WalletError;
use crate::blockchain::wallet::ChallengeMessage;

/// Errors returned by the rewards API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered but reported a logical failure (`code != 0`).
    #[error("[{endpoint}] Server error (code {code}): {msg}")]
    Remote {
        endpoint: &'static str,
        code: i64,
        msg: String,
    },

    /// Network or HTTP-layer failure.
    #[error("[{endpoint}] Transport error: {source}")]
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
    },

    /// Non-success HTTP status without a readable envelope.
    #[error("[{endpoint}] HTTP status {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    /// The body was not the expected envelope.
    #[error("[{endpoint}] Malformed response: {reason}")]
    Decode {
        endpoint: &'static str,
        reason: String,
    },

    /// The challenge could not be signed.
    #[error("Challenge signing failed: {0}")]
    Wallet(#[from] WalletError),

    /// The HTTP client could not be built.
    #[error("Invalid API client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Server-reported message, if this is a service-level failure.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ApiError::Remote { msg, .. } => Some(msg),
            _ => None,
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Access token issued by connect-wallet.
///
/// Sent verbatim in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Body of `POST /users/connect-wallet/`.
#[derive(Debug, Serialize)]
pub struct ConnectWalletRequest<'a> {
    pub message: &'a ChallengeMessage,
    pub wallet_address: &'a str,
    pub timestamp: u64,
    pub signature: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ConnectWalletData {
    pub access_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RedeemPreview {
    pub today_redeemable_points: u64,
}

/// Body of `POST /credit/create-redeem-order/`.
#[derive(Debug, Serialize)]
pub struct CreateRedeemOrderRequest {
    pub points_to_redeem: u64,
}

/// Server-signed redemption voucher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedeemOrder {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "credits_amount_scaled", deserialize_with = "u256_from_json")]
    pub amount: U256,
    #[serde(deserialize_with = "u64_from_json")]
    pub timestamp: u64,
    pub signature: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::Text(s) => s,
    })
}

fn u256_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| de::Error::custom(format!("amount {} is not an unsigned integer", n))),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<U256>()
            .map_err(|e| de::Error::custom(format!("amount '{}': {}", s, e))),
    }
}

fn u64_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n
            .as_u64()
            .ok_or_else(|| de::Error::custom(format!("{} is not an unsigned integer", n))),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| de::Error::custom(format!("'{}': {}", s, e))),
    }
}

/// Interpret a response body.
///
/// The envelope `code` decides success whatever the HTTP status was; the
/// status only matters when the body is not an envelope.
pub fn decode_envelope<T: DeserializeOwned>(
    endpoint: &'static str,
    status: StatusCode,
    body: &str,
) -> ApiResult<T> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => return Err(ApiError::Status { endpoint, status }),
        Err(e) => {
            return Err(ApiError::Decode {
                endpoint,
                reason: e.to_string(),
            })
        }
    };

    if envelope.code != 0 {
        return Err(ApiError::Remote {
            endpoint,
            code: envelope.code,
            msg: envelope.msg.unwrap_or_default(),
        });
    }

    let data = envelope.data.ok_or_else(|| ApiError::Decode {
        endpoint,
        reason: "missing data".to_string(),
    })?;

    serde_json::from_value(data).map_err(|e| ApiError::Decode {
        endpoint,
        reason: e.to_string(),
    })
}
