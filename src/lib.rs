//! Market mood from public price and gas data
//!
//! One aggregation cycle reads BTC/ETH spot prices and the current gas price on
//! Ethereum mainnet and Base, then reduces them to an explainable score.
//!
//! - [`GasOracle`] walks a method-major, endpoint-minor fallback chain of
//!   JSON-RPC calls and returns the first positive reading with its provenance
//! - [`PriceSource`] / [`CoinGeckoPriceSource`] read spot prices
//! - [`compute_mood`] is the pure scorer
//! - [`IndicatorAggregator`] runs all fetches concurrently
//!
//! ```rust,no_run
//! use moodboard::{CoinGeckoPriceSource, HttpRpcCaller, IndicatorAggregator, MoodboardConfig};
//!
//! # async fn example() -> Result<(), moodboard::MoodboardError> {
//! let config = MoodboardConfig::from_env()?;
//! let aggregator = IndicatorAggregator::new(
//!     &config,
//!     HttpRpcCaller::new()?,
//!     CoinGeckoPriceSource::from_config(&config)?,
//! );
//!
//! let indicators = aggregator.snapshot().await;
//! println!("{} ({})", indicators.mood().score, indicators.mood().bucket);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod gas;
pub mod mood;
pub mod price;
mod provider;
mod spans;
pub mod transport;
pub mod types;

pub use aggregator::{GasSources, IndicatorAggregator, Indicators};
pub use config::{ChainConfig, MoodboardConfig, MoodboardConfigBuilder};
pub use errors::{ConfigError, MoodboardError, PriceFetchError, RpcError};
pub use gas::{GasOracle, GasStrategy};
pub use mood::{compute_mood, MoodBucket, MoodDetails, MoodInput, MoodResult};
pub use price::{CoinGeckoPriceSource, PriceSource};
pub use provider::{HttpRpcCaller, RpcCaller};
pub use types::gas::{GasMethod, GasReading, GasSource};
pub use types::price::{Asset, MarketPrices, PriceSnapshot};
pub use types::wei::{gwei_from_json, gwei_to_hex_wei, hex_to_gwei, Gwei, WEI_PER_GWEI};
