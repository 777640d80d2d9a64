//! In-memory rewards API and chain used by unit tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::api::client::RewardApi;
use crate::api::types::{ApiError, ApiResult, AuthToken, RedeemOrder};
use crate::blockchain::submitter::ChainSubmitter;
use crate::blockchain::types::{ChainError, ChainResult, ClaimResult, ClaimStatus};
use crate::blockchain::wallet::Wallet;

/// Anvil's first development accounts.
pub const TEST_KEYS: [&str; 3] = [
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    "5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
];

pub fn test_wallets(n: usize) -> Vec<Wallet> {
    TEST_KEYS[..n]
        .iter()
        .map(|key| Wallet::from_private_key(key).unwrap())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Connect { address: Address },
    Preview { address: Address },
    CreateOrder { address: Address, points: u64 },
}

#[derive(Default)]
struct MockApiState {
    points: HashMap<Address, VecDeque<u64>>,
    calls: Vec<ApiCall>,
}

/// Scripted rewards API.
///
/// Tokens are the wallet address, and each preview pops the next scripted
/// value for that address. The last value repeats once the script runs out.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockApiState>,
    failures: HashMap<&'static str, (i64, String)>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(self, address: Address, script: Vec<u64>) -> Self {
        self.state
            .lock()
            .unwrap()
            .points
            .insert(address, script.into());
        self
    }

    /// Answer `endpoint` with `code != 0` and `msg`.
    pub fn failing_on(mut self, endpoint: &'static str, code: i64, msg: &str) -> Self {
        self.failures.insert(endpoint, (code, msg.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(
                    (endpoint, call),
                    ("connect-wallet", ApiCall::Connect { .. })
                        | ("points-preview", ApiCall::Preview { .. })
                        | ("create-redeem-order", ApiCall::CreateOrder { .. })
                )
            })
            .count()
    }

    /// Points requested by every created order, in order.
    pub fn orders(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::CreateOrder { points, .. } => Some(points),
                _ => None,
            })
            .collect()
    }

    fn check(&self, endpoint: &'static str) -> ApiResult<()> {
        match self.failures.get(endpoint) {
            Some((code, msg)) => Err(ApiError::Remote {
                endpoint,
                code: *code,
                msg: msg.clone(),
            }),
            None => Ok(()),
        }
    }

    fn address_of(token: &AuthToken) -> Address {
        token.as_str().parse().unwrap_or(Address::ZERO)
    }
}

#[async_trait]
impl RewardApi for MockApi {
    async fn connect_wallet(&self, wallet: &Wallet) -> ApiResult<AuthToken> {
        let address = wallet.address();
        self.state
            .lock()
            .unwrap()
            .calls
            .push(ApiCall::Connect { address });
        self.check("connect-wallet")?;
        Ok(AuthToken::new(address.to_string()))
    }

    async fn preview_redeemable(&self, token: &AuthToken) -> ApiResult<u64> {
        let address = Self::address_of(token);
        let mut state = self.state.lock().unwrap();
        state.calls.push(ApiCall::Preview { address });
        drop(state);
        self.check("points-preview")?;

        let mut state = self.state.lock().unwrap();
        let script = state.points.entry(address).or_default();
        let points = if script.len() > 1 {
            script.pop_front().unwrap_or_default()
        } else {
            script.front().copied().unwrap_or_default()
        };
        Ok(points)
    }

    async fn create_redeem_order(&self, token: &AuthToken, points: u64) -> ApiResult<RedeemOrder> {
        let address = Self::address_of(token);
        self.state
            .lock()
            .unwrap()
            .calls
            .push(ApiCall::CreateOrder { address, points });
        self.check("create-redeem-order")?;

        Ok(RedeemOrder {
            id: format!("order-{}", points),
            amount: U256::from(points),
            timestamp: 1_700_000_000,
            signature: format!("0x{}", "ab".repeat(65)),
        })
    }
}

/// Chain stub that mines every transaction with a fixed status.
pub struct MockChain {
    status: ClaimStatus,
    failing: HashSet<Address>,
    submitted: Mutex<Vec<(Address, RedeemOrder)>>,
}

impl MockChain {
    pub fn succeeding() -> Self {
        Self::with_status(ClaimStatus::Success)
    }

    pub fn reverting() -> Self {
        Self::with_status(ClaimStatus::Fail)
    }

    fn with_status(status: ClaimStatus) -> Self {
        Self {
            status,
            failing: HashSet::new(),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Reject submissions from `address` with a submission error.
    pub fn failing_for(mut self, address: Address) -> Self {
        self.failing.insert(address);
        self
    }

    pub fn submissions(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainSubmitter for MockChain {
    async fn redeem(&self, wallet: &Wallet, order: &RedeemOrder) -> ChainResult<ClaimResult> {
        let address = wallet.address();
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push((address, order.clone()));

        if self.failing.contains(&address) {
            return Err(ChainError::Submission("insufficient funds for gas".to_string()));
        }

        Ok(ClaimResult {
            tx_hash: TxHash::with_last_byte(submitted.len() as u8),
            block_number: 100 + submitted.len() as u64,
            status: self.status,
        })
    }
}
