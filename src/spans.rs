//! Span creation helpers for moodboard operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here and attaches
//! it with [`tracing::Instrument`].
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> T {
//!     async { /* business logic */ }
//!         .instrument(spans::my_operation(param))
//!         .await
//! }
//! ```

use alloy_chains::NamedChain;
use tracing::Span;

use crate::types::gas::GasMethod;

/// Create span for one full aggregation cycle.
///
/// Parent: None (root span for this operation)
/// Children: fetch_prices, latest_gas (one per chain)
#[inline]
pub(crate) fn aggregate_indicators() -> Span {
    tracing::info_span!("moodboard.aggregate_indicators")
}

/// Create span for the price API request.
///
/// Parent: aggregate_indicators
#[inline]
pub(crate) fn fetch_prices(api_host: &str) -> Span {
    tracing::info_span!("moodboard.fetch_prices", api_host = %api_host)
}

/// Create span for walking the gas fallback chain of one chain.
///
/// Parent: aggregate_indicators
/// Children: gas_attempt spans (one per method/endpoint pair tried)
#[inline]
pub(crate) fn latest_gas(chain: NamedChain, endpoint_count: usize, method_count: usize) -> Span {
    tracing::info_span!(
        "moodboard.latest_gas",
        chain = %chain,
        endpoint_count = endpoint_count,
        method_count = method_count,
    )
}

/// Create span for a single (method, endpoint) attempt.
///
/// Parent: latest_gas
/// Children: rpc_call span from the transport logging layer
#[inline]
pub(crate) fn gas_attempt(chain: NamedChain, method: GasMethod, endpoint: &str) -> Span {
    tracing::debug_span!(
        "moodboard.gas_attempt",
        chain = %chain,
        method = %method,
        endpoint = %endpoint,
    )
}
