//! Gas oracle: a bounded, sequential fallback chain over endpoints and methods.

use std::time::Duration;

use alloy_chains::NamedChain;
use tracing::{debug, info, warn, Instrument};
use url::Url;

use super::strategy::GasStrategy;
use crate::{
    config::{constants::DEFAULT_RPC_TIMEOUT_MS, constants::FEE_HISTORY_BLOCK_COUNT, MoodboardConfig},
    errors::RpcError,
    provider::RpcCaller,
    spans,
    transport::endpoint_label,
    types::{
        gas::{GasReading, GasSource},
        wei::Gwei,
    },
};

/// Why a single (method, endpoint) attempt produced nothing.
#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("result held no positive gas price")]
    InvalidValue,
}

/// Current gas price for one chain.
///
/// Strategies are tried in order; within a strategy, endpoints are tried in
/// order. The first attempt that yields a positive gwei value wins and its
/// endpoint and method are returned as provenance. If nothing works the
/// result is `None`: exhaustion is a normal outcome, not an error.
///
/// No state is kept between calls to [`latest_gas`](GasOracle::latest_gas);
/// every call starts again from the first strategy and endpoint.
///
/// # Example
///
/// ```no_run
/// use alloy_chains::NamedChain;
/// use moodboard::{GasOracle, HttpRpcCaller, MoodboardConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MoodboardConfig::default();
/// let oracle = GasOracle::from_config(NamedChain::Mainnet, &config, HttpRpcCaller::new()?);
///
/// match oracle.latest_gas().await {
///     Some(reading) => println!("{} via {}", reading.gwei, reading.source.method),
///     None => println!("gas unavailable"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GasOracle<C> {
    chain: NamedChain,
    endpoints: Vec<Url>,
    strategies: Vec<GasStrategy>,
    timeout: Duration,
    caller: C,
}

impl<C: RpcCaller> GasOracle<C> {
    /// Create an oracle with the default strategy chain and an 8 second timeout
    pub fn new(chain: NamedChain, endpoints: Vec<Url>, caller: C) -> Self {
        Self {
            chain,
            endpoints,
            strategies: GasStrategy::default_chain(FEE_HISTORY_BLOCK_COUNT),
            timeout: Duration::from_millis(DEFAULT_RPC_TIMEOUT_MS),
            caller,
        }
    }

    /// Create an oracle from configuration
    ///
    /// Uses the chain's effective endpoint list, timeout and the configured
    /// `eth_feeHistory` block window.
    pub fn from_config(chain: NamedChain, config: &MoodboardConfig, caller: C) -> Self {
        Self {
            chain,
            endpoints: config.get_endpoints(chain),
            strategies: GasStrategy::default_chain(config.fee_history_blocks),
            timeout: config.get_rpc_timeout(chain),
            caller,
        }
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the strategy chain
    pub fn with_strategies(mut self, strategies: Vec<GasStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// The chain this oracle reads
    pub fn chain(&self) -> NamedChain {
        self.chain
    }

    /// Endpoints in priority order
    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    /// Per-call timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Walk the fallback chain and return the first valid reading.
    ///
    /// Issues at most `strategies × endpoints` calls, one at a time, and stops
    /// at the first success. Never fails.
    pub async fn latest_gas(&self) -> Option<GasReading> {
        let span = spans::latest_gas(self.chain, self.endpoints.len(), self.strategies.len());

        async {
            for strategy in &self.strategies {
                for endpoint in &self.endpoints {
                    let label = endpoint_label(endpoint);
                    let attempt = self
                        .attempt(strategy, endpoint, &label)
                        .instrument(spans::gas_attempt(self.chain, strategy.method(), &label));

                    match attempt.await {
                        Ok(gwei) => {
                            info!(
                                chain = %self.chain,
                                gwei = gwei.as_u64(),
                                method = %strategy.method(),
                                endpoint = %label,
                                "Gas reading acquired"
                            );
                            return Some(GasReading {
                                gwei,
                                source: GasSource {
                                    endpoint: endpoint.clone(),
                                    method: strategy.method(),
                                },
                            });
                        }
                        Err(e) => {
                            debug!(
                                method = %strategy.method(),
                                endpoint = %label,
                                error = %e,
                                "Gas attempt failed, trying next candidate"
                            );
                        }
                    }
                }
            }

            warn!(
                chain = %self.chain,
                endpoints = self.endpoints.len(),
                methods = self.strategies.len(),
                "Every gas method failed on every endpoint"
            );
            None
        }
        .instrument(span)
        .await
    }

    async fn attempt(&self, strategy: &GasStrategy, endpoint: &Url, label: &str) -> Result<Gwei, AttemptError> {
        let method = strategy.method().rpc_method();
        let call = self.caller.call(endpoint, method, strategy.params().clone());

        let result = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| RpcError::timeout(label, method, self.timeout))??;

        strategy.extract(&result).ok_or(AttemptError::InvalidValue)
    }
}
