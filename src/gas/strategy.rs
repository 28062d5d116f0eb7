//! Gas query strategies.
//!
//! Each strategy knows how to ask a node for a fee and how to pull a gwei
//! value out of the answer. The oracle tries them in list order.

use serde_json::{json, Value};

use crate::types::{
    gas::GasMethod,
    wei::{gwei_from_json, Gwei},
};

/// One JSON-RPC query in the gas fallback chain.
#[derive(Debug, Clone, PartialEq)]
pub struct GasStrategy {
    method: GasMethod,
    params: Value,
}

impl GasStrategy {
    /// `eth_feeHistory(blocks, "latest", [])`, reading the last base fee.
    ///
    /// The last entry of `baseFeePerGas` is the projected base fee of the next
    /// block, which is what a transaction sent now would pay.
    pub fn fee_history(block_count: u64) -> Self {
        Self {
            method: GasMethod::FeeHistory,
            params: json!([format!("{block_count:#x}"), "latest", []]),
        }
    }

    /// `eth_gasPrice()`, reading the quantity itself.
    pub fn gas_price() -> Self {
        Self {
            method: GasMethod::GasPrice,
            params: json!([]),
        }
    }

    /// `eth_getBlockByNumber("latest", false)`, reading the header's base fee.
    pub fn latest_block() -> Self {
        Self {
            method: GasMethod::LatestBlock,
            params: json!(["latest", false]),
        }
    }

    /// Strategy for a method
    pub fn for_method(method: GasMethod, fee_history_blocks: u64) -> Self {
        match method {
            GasMethod::FeeHistory => Self::fee_history(fee_history_blocks),
            GasMethod::GasPrice => Self::gas_price(),
            GasMethod::LatestBlock => Self::latest_block(),
        }
    }

    /// Every strategy, most reliable first
    pub fn default_chain(fee_history_blocks: u64) -> Vec<Self> {
        GasMethod::PRIORITY
            .into_iter()
            .map(|method| Self::for_method(method, fee_history_blocks))
            .collect()
    }

    /// The method this strategy calls
    pub fn method(&self) -> GasMethod {
        self.method
    }

    /// The JSON-RPC params to send
    pub fn params(&self) -> &Value {
        &self.params
    }

    /// Pull a usable gas price out of a `result` member.
    ///
    /// Zero is rejected along with anything unparseable.
    pub fn extract(&self, result: &Value) -> Option<Gwei> {
        let raw = match self.method {
            GasMethod::FeeHistory => result
                .get("baseFeePerGas")
                .and_then(Value::as_array)
                .and_then(|fees| fees.last()),
            GasMethod::GasPrice => Some(result),
            GasMethod::LatestBlock => result.get("baseFeePerGas"),
        };

        gwei_from_json(raw).filter(|gwei| !gwei.is_zero())
    }
}
