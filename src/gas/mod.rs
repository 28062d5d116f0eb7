//! Gas price acquisition for EVM chains.
//!
//! ## Public API
//!
//! - [`GasOracle`] - walks a fixed fallback chain of JSON-RPC queries over an
//!   ordered endpoint list and returns the first positive reading
//! - [`GasStrategy`] - one query in that chain: method, params, extractor
//!
//! ## Fallback order
//!
//! Method-major, endpoint-minor: every endpoint is asked for `eth_feeHistory`
//! before any endpoint is asked for `eth_gasPrice`, and so on. Attempts are
//! strictly sequential and each is bounded by the oracle's timeout.

pub mod oracle;
pub mod strategy;

pub use oracle::GasOracle;
pub use strategy::GasStrategy;
