//! Shared utilities for integration testing.
//!
//! [`MockRewardsApi`] serves the three rewards endpoints on an ephemeral port.
//! connect-wallet verifies the personal-sign signature over the challenge JSON
//! before issuing a token, so a passing test proves the signing scheme.
//! [`rpc::MockRpcNode`] plays the chain side for the redeem submitter.

#![allow(dead_code)]

pub mod rpc;

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, Signature};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Anvil's first development accounts.
pub const TEST_KEYS: [&str; 3] = [
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    "5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
];

pub const TEST_ADDRESSES: [&str; 3] = [
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
];

#[derive(Default)]
struct MockState {
    points: HashMap<Address, VecDeque<u64>>,
    tokens: HashMap<String, Address>,
    failures: HashMap<&'static str, (i64, String)>,
    calls: Vec<&'static str>,
    orders: Vec<(Address, u64)>,
}

type Shared = Arc<Mutex<MockState>>;

/// In-process rewards API.
pub struct MockRewardsApi {
    addr: SocketAddr,
    state: Shared,
}

impl MockRewardsApi {
    pub async fn start() -> Self {
        let state: Shared = Arc::default();
        let app = Router::new()
            .route("/api/v1/users/connect-wallet/", post(connect_wallet))
            .route("/api/v1/reward/points-redeem/preview/", get(preview))
            .route("/api/v1/credit/create-redeem-order/", post(create_order))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    /// Previews for `address` pop from `script`; the last value repeats.
    pub fn set_points(&self, address: &str, script: Vec<u64>) {
        let address = Address::from_str(address).unwrap();
        self.state.lock().unwrap().points.insert(address, script.into());
    }

    /// Answer `endpoint` with HTTP 200 and `{"code": code, "msg": msg}`.
    pub fn fail(&self, endpoint: &'static str, code: i64, msg: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(endpoint, (code, msg.to_string()));
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == endpoint)
            .count()
    }

    pub fn orders(&self) -> Vec<(Address, u64)> {
        self.state.lock().unwrap().orders.clone()
    }
}

fn envelope(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({"code": 0, "msg": "ok", "data": data})))
}

fn error(status: StatusCode, code: i64, msg: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({"code": code, "msg": msg, "data": null})))
}

fn injected(state: &mut MockState, endpoint: &'static str) -> Option<(StatusCode, Json<Value>)> {
    state.calls.push(endpoint);
    state
        .failures
        .get(endpoint)
        .map(|(code, msg)| error(StatusCode::OK, *code, msg))
}

fn caller(state: &MockState, headers: &HeaderMap) -> Option<Address> {
    let token = headers.get("authorization")?.to_str().ok()?;
    state.tokens.get(token).copied()
}

async fn connect_wallet(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    if let Some(response) = injected(&mut state, "connect-wallet") {
        return response;
    }

    let wallet = body["wallet_address"].as_str().unwrap_or_default();
    let timestamp = body["timestamp"].as_u64().unwrap_or_default();
    if body["message"]["wallet_address"] != body["wallet_address"]
        || body["message"]["timestamp"] != body["timestamp"]
    {
        return error(StatusCode::BAD_REQUEST, 4000, "message does not match body");
    }

    // The signed bytes are the challenge JSON with fields in declaration order.
    let message = format!(
        r#"{{"wallet_address":"{}","timestamp":{}}}"#,
        wallet, timestamp
    );
    let recovered = body["signature"]
        .as_str()
        .and_then(|s| alloy::hex::decode(s).ok())
        .and_then(|raw| Signature::try_from(raw.as_slice()).ok())
        .and_then(|sig| sig.recover_address_from_msg(message.as_bytes()).ok());

    match (recovered, Address::from_str(wallet)) {
        (Some(recovered), Ok(claimed)) if recovered == claimed => {
            let token = format!("token-{}", state.tokens.len() + 1);
            state.tokens.insert(token.clone(), claimed);
            envelope(json!({ "access_token": token }))
        }
        _ => error(StatusCode::OK, 4001, "Invalid signature"),
    }
}

async fn preview(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    if let Some(response) = injected(&mut state, "points-preview") {
        return response;
    }

    let Some(address) = caller(&state, &headers) else {
        return error(StatusCode::UNAUTHORIZED, 401, "Unauthorized");
    };
    let script = state.points.entry(address).or_default();
    let points = if script.len() > 1 {
        script.pop_front().unwrap_or_default()
    } else {
        script.front().copied().unwrap_or_default()
    };

    envelope(json!({ "today_redeemable_points": points }))
}

async fn create_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    if let Some(response) = injected(&mut state, "create-redeem-order") {
        return response;
    }

    let Some(address) = caller(&state, &headers) else {
        return error(StatusCode::UNAUTHORIZED, 401, "Unauthorized");
    };
    let points = body["points_to_redeem"].as_u64().unwrap_or_default();
    state.orders.push((address, points));

    envelope(json!({
        "id": 1000 + state.orders.len(),
        "credits_amount_scaled": format!("{}000000000000000000", points),
        "timestamp": 1_700_000_000u64,
        "signature": format!("0x{}", "11".repeat(65)),
    }))
}
