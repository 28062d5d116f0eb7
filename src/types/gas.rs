// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gas readings and their provenance.

use serde::{Deserialize, Serialize};
use url::Url;

use super::wei::Gwei;

/// The JSON-RPC query that produced a gas reading.
///
/// Serialized as the JSON-RPC method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GasMethod {
    /// `eth_feeHistory`: last base fee of a short recent block window
    #[serde(rename = "eth_feeHistory")]
    FeeHistory,
    /// `eth_gasPrice`: the legacy single gas price
    #[serde(rename = "eth_gasPrice")]
    GasPrice,
    /// `eth_getBlockByNumber("latest")`: base fee of the newest header
    #[serde(rename = "eth_getBlockByNumber")]
    LatestBlock,
}

impl GasMethod {
    /// All methods, most reliable first.
    pub const PRIORITY: [GasMethod; 3] = [
        GasMethod::FeeHistory,
        GasMethod::GasPrice,
        GasMethod::LatestBlock,
    ];

    /// The JSON-RPC method name
    pub const fn rpc_method(&self) -> &'static str {
        match self {
            GasMethod::FeeHistory => "eth_feeHistory",
            GasMethod::GasPrice => "eth_gasPrice",
            GasMethod::LatestBlock => "eth_getBlockByNumber",
        }
    }
}

impl std::fmt::Display for GasMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.rpc_method())
    }
}

/// Which endpoint and method produced a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasSource {
    /// RPC endpoint that answered
    pub endpoint: Url,
    /// Query that was used
    pub method: GasMethod,
}

/// A positive gas price together with its provenance.
///
/// Oracles return `Option<GasReading>`, so a value never exists without its
/// source and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasReading {
    /// Gas price in gwei, always greater than zero
    pub gwei: Gwei,
    /// Where it came from
    pub source: GasSource,
}
