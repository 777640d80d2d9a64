//! Minimal JSON-RPC node for driving `RedeemSubmitter` end to end.
//!
//! Answers the calls a wallet provider makes to fill, send and confirm one
//! transaction. Raw transactions are kept so tests can decode their calldata,
//! and every receipt reports the configured status.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use alloy::primitives::{keccak256, Address, Bytes, B256};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const CHAIN_ID: u64 = 31337;
pub const RECEIPT_BLOCK: u64 = 42;

struct RpcState {
    receipt_status: bool,
    methods: Vec<String>,
    sent: Vec<(B256, Bytes)>,
}

type Shared = Arc<Mutex<RpcState>>;

pub struct MockRpcNode {
    addr: SocketAddr,
    state: Shared,
}

impl MockRpcNode {
    /// Start a node whose receipts report `status` (`true` is `0x1`).
    pub async fn start(receipt_status: bool) -> Self {
        let state = Arc::new(Mutex::new(RpcState {
            receipt_status,
            methods: Vec::new(),
            sent: Vec::new(),
        }));
        let app = Router::new()
            .route("/", post(handle))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Raw signed transactions received through `eth_sendRawTransaction`.
    pub fn sent(&self) -> Vec<(B256, Bytes)> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn calls_to(&self, method: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .methods
            .iter()
            .filter(|m| *m == method)
            .count()
    }
}

async fn handle(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut state = state.lock().unwrap();
    match body {
        Value::Array(calls) => Json(Value::Array(
            calls.iter().map(|call| answer(&mut state, call)).collect(),
        )),
        call => Json(answer(&mut state, &call)),
    }
}

fn answer(state: &mut RpcState, call: &Value) -> Value {
    let id = call["id"].clone();
    let method = call["method"].as_str().unwrap_or_default().to_string();
    let params = &call["params"];
    state.methods.push(method.clone());

    let result = match method.as_str() {
        "eth_chainId" => json!(format!("{:#x}", CHAIN_ID)),
        "eth_blockNumber" => json!(format!("{:#x}", RECEIPT_BLOCK)),
        "eth_getBlockByNumber" => Value::Null,
        "eth_getTransactionCount" => json!("0x0"),
        "eth_estimateGas" => json!("0x30d40"),
        "eth_gasPrice" | "eth_maxPriorityFeePerGas" => json!("0x3b9aca00"),
        "eth_blobBaseFee" => json!("0x1"),
        "eth_feeHistory" => json!({
            "oldestBlock": format!("{:#x}", RECEIPT_BLOCK - 1),
            "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
            "gasUsedRatio": [0.5],
            "reward": [["0x3b9aca00"]],
        }),
        "eth_sendRawTransaction" => {
            let raw: Bytes = params[0].as_str().unwrap_or_default().parse().unwrap_or_default();
            let hash = keccak256(&raw);
            state.sent.push((hash, raw));
            json!(hash)
        }
        "eth_getTransactionReceipt" => {
            let requested = params[0].as_str().unwrap_or_default().parse::<B256>().ok();
            match state.sent.iter().find(|(hash, _)| Some(*hash) == requested) {
                Some((hash, _)) => receipt(*hash, state.receipt_status),
                None => Value::Null,
            }
        }
        _ => {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("method {} not found", method) },
            })
        }
    };

    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn receipt(hash: B256, status: bool) -> Value {
    json!({
        "transactionHash": hash,
        "transactionIndex": "0x0",
        "blockHash": B256::repeat_byte(0xab),
        "blockNumber": format!("{:#x}", RECEIPT_BLOCK),
        "from": Address::ZERO,
        "to": Address::repeat_byte(0x11),
        "cumulativeGasUsed": "0x30d40",
        "gasUsed": "0x30d40",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "type": "0x2",
        "status": if status { "0x1" } else { "0x0" },
    })
}
