//! JSON-RPC access to EVM nodes
//!
//! [`RpcCaller`] is the seam between the gas oracle and the network: one call,
//! one endpoint, one method, raw JSON in and out. [`HttpRpcCaller`] implements
//! it with an Alloy [`RootProvider`] over HTTP, sharing a single reqwest client
//! (connection pool, default headers) across every endpoint.

use std::sync::Arc;
use std::time::Duration;

use alloy_network::Ethereum;
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::ClientBuilder;
use alloy_transport::TransportError;
use alloy_transport_http::{
    reqwest::{
        self,
        header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    },
    Http,
};
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::config::{constants, MoodboardConfig};
use crate::errors::{MoodboardError, RpcError};
use crate::transport::{endpoint_label, LoggingLayer};

/// Issues a single JSON-RPC request against one endpoint.
///
/// Implementations must not retry; fallback across endpoints and methods is
/// the caller's job. Timeouts are applied by the caller as well.
///
/// # Returns
///
/// - `Ok(result)` - the `result` member of a successful response
/// - `Err(RpcError)` - transport failure, non-2xx status, JSON-RPC `error`
///   member, or a missing/null `result`
#[async_trait]
pub trait RpcCaller: Send + Sync {
    /// Send `method` with `params` to `endpoint`.
    async fn call(&self, endpoint: &Url, method: &'static str, params: Value) -> Result<Value, RpcError>;
}

#[async_trait]
impl<T: RpcCaller + ?Sized> RpcCaller for Arc<T> {
    async fn call(&self, endpoint: &Url, method: &'static str, params: Value) -> Result<Value, RpcError> {
        self.as_ref().call(endpoint, method, params).await
    }
}

/// Production [`RpcCaller`] over HTTP.
///
/// # Example
///
/// ```no_run
/// use moodboard::{HttpRpcCaller, RpcCaller};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let caller = HttpRpcCaller::new()?;
/// let endpoint = "https://mainnet.base.org".parse()?;
/// let gas_price = caller.call(&endpoint, "eth_gasPrice", json!([])).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpRpcCaller {
    client: reqwest::Client,
    log_payloads: bool,
}

impl HttpRpcCaller {
    /// Create a caller with the default headers
    pub fn new() -> Result<Self, MoodboardError> {
        Ok(Self {
            client: build_http_client(None).map_err(MoodboardError::HttpClient)?,
            log_payloads: false,
        })
    }

    /// Create a caller honouring the configured payload logging
    pub fn from_config(config: &MoodboardConfig) -> Result<Self, MoodboardError> {
        let caller = Self::new()?;
        Ok(if config.log_rpc_payloads {
            caller.with_payload_logging()
        } else {
            caller
        })
    }

    /// Log request and response payloads at `trace`
    pub fn with_payload_logging(mut self) -> Self {
        self.log_payloads = true;
        self
    }

    fn provider(&self, endpoint: &Url) -> RootProvider<Ethereum> {
        let mut layer = LoggingLayer::for_endpoint(endpoint);
        if self.log_payloads {
            layer = layer.with_payload_logging();
        }

        let transport = Http::with_client(self.client.clone(), endpoint.clone());
        let client = ClientBuilder::default().layer(layer).transport(transport, false);
        RootProvider::new(client)
    }
}

#[async_trait]
impl RpcCaller for HttpRpcCaller {
    async fn call(&self, endpoint: &Url, method: &'static str, params: Value) -> Result<Value, RpcError> {
        let provider = self.provider(endpoint);

        let result: Value = provider
            .raw_request(method.into(), params)
            .await
            .map_err(|e| classify_transport_error(endpoint, method, e))?;

        if result.is_null() {
            return Err(RpcError::missing_result(endpoint_label(endpoint), method));
        }
        Ok(result)
    }
}

/// Build the reqwest client shared by RPC and price requests.
///
/// Every request carries `accept: application/json` and the moodboard user agent.
pub(crate) fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Map an Alloy transport error onto the crate's per-attempt error.
fn classify_transport_error(endpoint: &Url, method: &'static str, error: TransportError) -> RpcError {
    let label = endpoint_label(endpoint);
    match error {
        alloy_json_rpc::RpcError::ErrorResp(payload) => {
            RpcError::error_response(label, method, payload.code, payload.message.to_string())
        }
        alloy_json_rpc::RpcError::NullResp => RpcError::missing_result(label, method),
        other => RpcError::transport(label, method, other),
    }
}
