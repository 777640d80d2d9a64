//! HTTP client for the rewards API.
//!
//! # Responsibilities
//! - Exchange a signed challenge for an access token
//! - Query today's redeemable points
//! - Request a server-signed redeem voucher
//!
//! Each operation is a single round trip; nothing is retried here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::api::types::{
    decode_envelope, ApiError, ApiResult, AuthToken, ConnectWalletData, ConnectWalletRequest,
    CreateRedeemOrderRequest, RedeemOrder, RedeemPreview,
};
use crate::blockchain::wallet::{unix_timestamp, Wallet};
use crate::config::ApiConfig;

pub const CONNECT_WALLET_PATH: &str = "/users/connect-wallet/";
pub const PREVIEW_PATH: &str = "/reward/points-redeem/preview/";
pub const CREATE_ORDER_PATH: &str = "/credit/create-redeem-order/";

const USER_AGENT: &str = concat!("credit-claimer/", env!("CARGO_PKG_VERSION"));

/// The three rewards API operations the claim flow depends on.
#[async_trait]
pub trait RewardApi: Send + Sync {
    /// Sign a fresh challenge with `wallet` and exchange it for an access token.
    async fn connect_wallet(&self, wallet: &Wallet) -> ApiResult<AuthToken>;

    /// Today's redeemable point count. May be zero.
    async fn preview_redeemable(&self, token: &AuthToken) -> ApiResult<u64>;

    /// Request a voucher for exactly `points`. The amount is not checked here.
    async fn create_redeem_order(&self, token: &AuthToken, points: u64) -> ApiResult<RedeemOrder>;
}

/// [`RewardApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct RewardClient {
    http: Client,
    base_url: String,
}

impl RewardClient {
    /// Create a client for `config.base_url`.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = request
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        tracing::trace!(endpoint, status = %status, "Rewards API response");

        decode_envelope(endpoint, status, &body)
    }
}

#[async_trait]
impl RewardApi for RewardClient {
    async fn connect_wallet(&self, wallet: &Wallet) -> ApiResult<AuthToken> {
        let signed = wallet.sign_challenge(unix_timestamp()).await?;
        let body = ConnectWalletRequest {
            message: &signed.message,
            wallet_address: &signed.message.wallet_address,
            timestamp: signed.message.timestamp,
            signature: &signed.signature,
        };

        let request = self.http.post(self.url(CONNECT_WALLET_PATH)).json(&body);
        let data: ConnectWalletData = self.send("connect-wallet", request).await?;

        Ok(AuthToken::new(data.access_token))
    }

    async fn preview_redeemable(&self, token: &AuthToken) -> ApiResult<u64> {
        let request = self
            .http
            .get(self.url(PREVIEW_PATH))
            .header(AUTHORIZATION, token.as_str());
        let preview: RedeemPreview = self.send("points-preview", request).await?;

        Ok(preview.today_redeemable_points)
    }

    async fn create_redeem_order(&self, token: &AuthToken, points: u64) -> ApiResult<RedeemOrder> {
        let request = self
            .http
            .post(self.url(CREATE_ORDER_PATH))
            .header(AUTHORIZATION, token.as_str())
            .json(&CreateRedeemOrderRequest {
                points_to_redeem: points,
            });

        self.send("create-redeem-order", request).await
    }
}
