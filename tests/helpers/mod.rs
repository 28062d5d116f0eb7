// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for moodboard integration tests
//!
//! Provides mock implementations of the network seams so the gas oracle and
//! aggregator can be exercised without real RPC endpoints or price APIs, and a
//! local HTTP server with canned answers for the production clients.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_transport_http::reqwest::StatusCode;
use async_trait::async_trait;
use moodboard::{
    gwei_to_hex_wei, Gwei, MarketPrices, PriceFetchError, PriceSource, RpcCaller, RpcError,
};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

pub const FEE_HISTORY: &str = "eth_feeHistory";
pub const GAS_PRICE: &str = "eth_gasPrice";
pub const LATEST_BLOCK: &str = "eth_getBlockByNumber";

/// Parse a test URL
pub fn url(endpoint: &str) -> Url {
    Url::parse(endpoint).unwrap()
}

/// How a scripted (endpoint, method) pair answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// A successful `result`
    Result(Value),
    /// A JSON-RPC `error` member
    Error { code: i64, message: String },
    /// A response without a usable `result`
    Missing,
    /// Answer with `Result` only after sleeping
    Delayed(Duration, Value),
}

/// One call observed by [`MockRpcCaller`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: String,
    pub method: String,
    pub params: Value,
}

/// Scripted [`RpcCaller`] that records every attempt.
///
/// Pairs that were not scripted answer with JSON-RPC error `-32601`.
///
/// # Example
///
/// ```rust,ignore
/// let caller = MockRpcCaller::new()
///     .fee_history("https://a.example", 12)
///     .reply("https://b.example", GAS_PRICE, Reply::Missing);
/// ```
#[derive(Debug, Default)]
pub struct MockRpcCaller {
    replies: HashMap<(String, String), Reply>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockRpcCaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for one (endpoint, method) pair
    pub fn reply(mut self, endpoint: &str, method: &str, reply: Reply) -> Self {
        self.replies
            .insert((url(endpoint).to_string(), method.to_string()), reply);
        self
    }

    /// `eth_feeHistory` answering with a base fee window ending in `gwei`
    pub fn fee_history(self, endpoint: &str, gwei: u64) -> Self {
        self.reply(endpoint, FEE_HISTORY, Reply::Result(fee_history_result(gwei)))
    }

    /// `eth_gasPrice` answering `gwei`
    pub fn gas_price(self, endpoint: &str, gwei: u64) -> Self {
        self.reply(endpoint, GAS_PRICE, Reply::Result(json!(gwei_to_hex_wei(Gwei::new(gwei)))))
    }

    /// `eth_getBlockByNumber` answering a header with base fee `gwei`
    pub fn latest_block(self, endpoint: &str, gwei: u64) -> Self {
        self.reply(endpoint, LATEST_BLOCK, Reply::Result(block_result(gwei)))
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// `(endpoint, method)` of every call made so far, in order
    pub fn attempts(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .map(|c| (c.endpoint, c.method))
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RpcCaller for MockRpcCaller {
    async fn call(&self, endpoint: &Url, method: &'static str, params: Value) -> Result<Value, RpcError> {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint: endpoint.to_string(),
            method: method.to_string(),
            params,
        });

        let reply = self
            .replies
            .get(&(endpoint.to_string(), method.to_string()))
            .cloned();

        match reply {
            Some(Reply::Result(value)) => Ok(value),
            Some(Reply::Error { code, message }) => {
                Err(RpcError::error_response(endpoint.as_str(), method, code, message))
            }
            Some(Reply::Missing) => Err(RpcError::missing_result(endpoint.as_str(), method)),
            Some(Reply::Delayed(delay, value)) => {
                tokio::time::sleep(delay).await;
                Ok(value)
            }
            None => Err(RpcError::error_response(
                endpoint.as_str(),
                method,
                -32601,
                "the method does not exist/is not available",
            )),
        }
    }
}

/// `eth_feeHistory` result whose newest base fee is `gwei`
pub fn fee_history_result(gwei: u64) -> Value {
    json!({
        "oldestBlock": "0x1400000",
        "baseFeePerGas": [
            gwei_to_hex_wei(Gwei::new(gwei + 3)),
            gwei_to_hex_wei(Gwei::new(gwei + 1)),
            gwei_to_hex_wei(Gwei::new(gwei)),
        ],
        "gasUsedRatio": [0.51, 0.42]
    })
}

/// Minimal `eth_getBlockByNumber` header with base fee `gwei`
pub fn block_result(gwei: u64) -> Value {
    json!({
        "number": "0x1400000",
        "hash": "0x5f3c6a1c0b7f9a8e2d4c3b2a1908f7e6d5c4b3a2918f7e6d5c4b3a2918f7e6d5",
        "baseFeePerGas": gwei_to_hex_wei(Gwei::new(gwei)),
    })
}

/// Mock [`PriceSource`] with a fixed answer
pub struct MockPriceSource {
    outcome: Result<MarketPrices, StatusCode>,
    delay: Option<Duration>,
    calls: Mutex<usize>,
}

impl MockPriceSource {
    /// Always answer with `prices`
    pub fn ok(prices: MarketPrices) -> Self {
        Self {
            outcome: Ok(prices),
            delay: None,
            calls: Mutex::new(0),
        }
    }

    /// Always fail with an HTTP status
    pub fn failing(status: StatusCode) -> Self {
        Self {
            outcome: Err(status),
            delay: None,
            calls: Mutex::new(0),
        }
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn fetch_prices(&self) -> Result<MarketPrices, PriceFetchError> {
        *self.calls.lock().unwrap() += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.map_err(PriceFetchError::Status)
    }
}

/// One HTTP request received by [`FixtureServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Request line and headers
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    /// The request line, e.g. `POST /v2/key HTTP/1.1`
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    /// Body parsed as JSON, `Null` if it is not
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }
}

/// Status and body sent back by [`FixtureServer`].
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 with a JSON body
    pub fn json(body: Value) -> Self {
        Self::new(200, body.to_string())
    }

    /// JSON-RPC success echoing the request id
    pub fn rpc_result(request: &CapturedRequest, result: Value) -> Self {
        Self::json(json!({ "jsonrpc": "2.0", "id": request.json()["id"], "result": result }))
    }

    /// JSON-RPC error member echoing the request id
    pub fn rpc_error(request: &CapturedRequest, code: i64, message: &str) -> Self {
        Self::json(json!({
            "jsonrpc": "2.0",
            "id": request.json()["id"],
            "error": { "code": code, "message": message }
        }))
    }
}

type Responder = dyn Fn(&CapturedRequest) -> CannedResponse + Send + Sync;

/// Minimal HTTP/1.1 server on 127.0.0.1 answering every request from a closure.
///
/// Each connection serves one request and is closed. Requests are recorded in
/// arrival order.
pub struct FixtureServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FixtureServer {
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&CapturedRequest) -> CannedResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let respond: Arc<Responder> = Arc::new(respond);

        let log = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let respond = Arc::clone(&respond);
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    if let Some(request) = read_request(&mut stream).await {
                        let reply = (respond.as_ref())(&request);
                        log.lock().unwrap().push(request);
                        write_response(&mut stream, &reply).await;
                    }
                });
            }
        });

        Self { addr, requests }
    }

    /// Always answer with the same status and body
    pub async fn fixed(status: u16, body: &'static str) -> Self {
        Self::start(move |_| CannedResponse::new(status, body)).await
    }

    /// URL of `path` on this server
    pub fn url(&self, path: &str) -> Url {
        url(&format!("http://{}{}", self.addr, path))
    }

    /// `host:port` of this server
    pub fn authority(&self) -> String {
        self.addr.to_string()
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(CapturedRequest {
        head,
        body: String::from_utf8_lossy(&buf[header_end..]).into_owned(),
    })
}

async fn write_response(stream: &mut TcpStream, reply: &CannedResponse) {
    let reason = match reply.status {
        200 => "OK",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        reply.status,
        reason,
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// A local address with nothing listening on it
pub async fn closed_port_url(path: &str) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    url(&format!("http://{addr}{path}"))
}
