//! Configuration for moodboard
//!
//! Controls which RPC endpoints are queried per chain, the per-call timeout,
//! and where spot prices come from.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use moodboard::MoodboardConfig;
//! use alloy_chains::NamedChain;
//!
//! // Public endpoints only, 8 second RPC timeout
//! let config = MoodboardConfig::default();
//! assert_eq!(config.get_endpoints(NamedChain::Base).len(), 3);
//! ```
//!
//! # Example: Operator-preferred endpoint
//!
//! ```rust
//! use moodboard::MoodboardConfigBuilder;
//! use alloy_chains::NamedChain;
//! use std::time::Duration;
//!
//! let config = MoodboardConfigBuilder::new()
//!     .preferred_endpoint(NamedChain::Mainnet, "https://eth.example/key".parse().unwrap())
//!     .chain_timeout(NamedChain::Base, Duration::from_secs(3))
//!     .build();
//!
//! let endpoints = config.get_endpoints(NamedChain::Mainnet);
//! assert_eq!(endpoints[0].as_str(), "https://eth.example/key");
//! ```

use std::collections::HashMap;
use std::time::Duration;

use alloy_chains::NamedChain;
use url::Url;

use crate::errors::ConfigError;

pub mod constants;

use constants::{
    public_rpc_endpoints, rpc_url_env_var, COINGECKO_SIMPLE_PRICE_URL, DEFAULT_PRICE_TIMEOUT_MS,
    DEFAULT_RPC_TIMEOUT_MS, FEE_HISTORY_BLOCK_COUNT, TRACKED_CHAINS,
};

const RPC_TIMEOUT_VAR: &str = "RPC_TIMEOUT_MS";
const PRICE_TIMEOUT_VAR: &str = "PRICE_TIMEOUT_MS";
const PRICE_API_URL_VAR: &str = "PRICE_API_URL";
const RPC_LOG_PAYLOADS_VAR: &str = "RPC_LOG_PAYLOADS";

/// Configuration for moodboard
///
/// Use [`MoodboardConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct MoodboardConfig {
    /// Timeout for each individual RPC call
    /// Default: 8 seconds
    pub rpc_timeout: Duration,

    /// Timeout for the price API request
    /// Default: 10 seconds
    pub price_timeout: Duration,

    /// Block window requested from `eth_feeHistory`
    /// Default: 5
    pub fee_history_blocks: u64,

    /// Price API endpoint (CoinGecko simple price compatible)
    pub price_api_url: String,

    /// Log JSON-RPC request and response bodies at `trace`
    /// Default: false
    pub log_rpc_payloads: bool,

    /// Chain-specific overrides
    pub chain_overrides: HashMap<NamedChain, ChainConfig>,
}

/// Chain-specific configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ChainConfig {
    /// Endpoint tried before the fallback list
    pub preferred_endpoint: Option<Url>,

    /// Replaces the built-in public endpoint list
    pub fallback_endpoints: Option<Vec<Url>>,

    /// Override RPC timeout for this chain
    pub rpc_timeout: Option<Duration>,
}

impl Default for MoodboardConfig {
    fn default() -> Self {
        Self {
            rpc_timeout: Duration::from_millis(DEFAULT_RPC_TIMEOUT_MS),
            price_timeout: Duration::from_millis(DEFAULT_PRICE_TIMEOUT_MS),
            fee_history_blocks: FEE_HISTORY_BLOCK_COUNT,
            price_api_url: COINGECKO_SIMPLE_PRICE_URL.to_string(),
            log_rpc_payloads: false,
            chain_overrides: HashMap::new(),
        }
    }
}

impl MoodboardConfig {
    /// Load configuration from the process environment (and `.env`, if present)
    ///
    /// | Variable           | Effect                                   |
    /// |--------------------|------------------------------------------|
    /// | `ETH_RPC_URL`      | preferred Ethereum mainnet endpoint      |
    /// | `BASE_RPC_URL`     | preferred Base endpoint                  |
    /// | `RPC_TIMEOUT_MS`   | per-call RPC timeout                     |
    /// | `PRICE_TIMEOUT_MS` | price API timeout                        |
    /// | `PRICE_API_URL`    | price API endpoint                       |
    /// | `RPC_LOG_PAYLOADS` | `1`/`true`/`yes` logs RPC bodies         |
    ///
    /// Unset or blank variables keep the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut builder = MoodboardConfigBuilder::new();

        for chain in TRACKED_CHAINS {
            let Some(var) = rpc_url_env_var(chain) else {
                continue;
            };
            if let Some(value) = read(var) {
                let url = Url::parse(&value)
                    .map_err(|e| ConfigError::invalid_url(var, value.clone(), e))?;
                builder = builder.preferred_endpoint(chain, url);
            }
        }

        if let Some(value) = read(RPC_TIMEOUT_VAR) {
            builder = builder.rpc_timeout(parse_millis(RPC_TIMEOUT_VAR, &value)?);
        }

        if let Some(value) = read(PRICE_TIMEOUT_VAR) {
            builder = builder.price_timeout(parse_millis(PRICE_TIMEOUT_VAR, &value)?);
        }

        if let Some(value) = read(PRICE_API_URL_VAR) {
            Url::parse(&value)
                .map_err(|e| ConfigError::invalid_url(PRICE_API_URL_VAR, value.clone(), e))?;
            builder = builder.price_api_url(value);
        }

        if let Some(value) = read(RPC_LOG_PAYLOADS_VAR) {
            builder = builder.log_rpc_payloads(matches!(
                value.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            ));
        }

        Ok(builder.build())
    }

    /// Ordered endpoints to try for a chain
    ///
    /// The preferred endpoint (if any) comes first, followed by the fallback
    /// list. Duplicates of the preferred endpoint are dropped from the
    /// fallbacks.
    pub fn get_endpoints(&self, chain: NamedChain) -> Vec<Url> {
        let overrides = self.chain_overrides.get(&chain);
        let preferred = overrides.and_then(|c| c.preferred_endpoint.clone());

        let fallbacks: Vec<Url> = match overrides.and_then(|c| c.fallback_endpoints.clone()) {
            Some(list) => list,
            None => public_rpc_endpoints(chain)
                .iter()
                .filter_map(|endpoint| Url::parse(endpoint).ok())
                .collect(),
        };

        preferred
            .iter()
            .cloned()
            .chain(
                fallbacks
                    .into_iter()
                    .filter(|url| preferred.as_ref() != Some(url)),
            )
            .collect()
    }

    /// Get effective RPC timeout for a specific chain
    pub fn get_rpc_timeout(&self, chain: NamedChain) -> Duration {
        self.chain_overrides
            .get(&chain)
            .and_then(|c| c.rpc_timeout)
            .unwrap_or(self.rpc_timeout)
    }

    /// Set chain-specific override
    pub fn set_chain_override(&mut self, chain: NamedChain, config: ChainConfig) {
        self.chain_overrides.insert(chain, config);
    }
}

fn parse_millis(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::invalid_duration(var, value)),
    }
}

/// Builder for [`MoodboardConfig`]
///
/// # Example
///
/// ```rust
/// use moodboard::MoodboardConfigBuilder;
/// use std::time::Duration;
///
/// let config = MoodboardConfigBuilder::new()
///     .rpc_timeout(Duration::from_secs(4))
///     .fee_history_blocks(10)
///     .build();
/// assert_eq!(config.fee_history_blocks, 10);
/// ```
#[derive(Debug, Default)]
pub struct MoodboardConfigBuilder {
    config: MoodboardConfig,
}

impl MoodboardConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set global RPC timeout
    pub fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.config.rpc_timeout = timeout;
        self
    }

    /// Set the price API timeout
    pub fn price_timeout(mut self, timeout: Duration) -> Self {
        self.config.price_timeout = timeout;
        self
    }

    /// Set the `eth_feeHistory` block window
    pub fn fee_history_blocks(mut self, blocks: u64) -> Self {
        self.config.fee_history_blocks = blocks;
        self
    }

    /// Set the price API endpoint
    pub fn price_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.price_api_url = url.into();
        self
    }

    /// Log JSON-RPC payloads at `trace`
    pub fn log_rpc_payloads(mut self, enabled: bool) -> Self {
        self.config.log_rpc_payloads = enabled;
        self
    }

    /// Add chain-specific configuration
    pub fn chain_config(mut self, chain: NamedChain, config: ChainConfig) -> Self {
        self.config.set_chain_override(chain, config);
        self
    }

    /// Convenience: put an endpoint in front of a chain's fallback list
    pub fn preferred_endpoint(mut self, chain: NamedChain, endpoint: Url) -> Self {
        let existing = self.config.chain_overrides.remove(&chain).unwrap_or_default();
        self.config.set_chain_override(
            chain,
            ChainConfig {
                preferred_endpoint: Some(endpoint),
                ..existing
            },
        );
        self
    }

    /// Convenience: replace a chain's public fallback list
    pub fn fallback_endpoints(mut self, chain: NamedChain, endpoints: Vec<Url>) -> Self {
        let existing = self.config.chain_overrides.remove(&chain).unwrap_or_default();
        self.config.set_chain_override(
            chain,
            ChainConfig {
                fallback_endpoints: Some(endpoints),
                ..existing
            },
        );
        self
    }

    /// Convenience: set RPC timeout for a specific chain
    pub fn chain_timeout(mut self, chain: NamedChain, timeout: Duration) -> Self {
        let existing = self.config.chain_overrides.remove(&chain).unwrap_or_default();
        self.config.set_chain_override(
            chain,
            ChainConfig {
                rpc_timeout: Some(timeout),
                ..existing
            },
        );
        self
    }

    /// Build the final configuration
    pub fn build(self) -> MoodboardConfig {
        self.config
    }
}
