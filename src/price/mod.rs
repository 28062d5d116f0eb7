//! Spot prices from a public price API
//!
//! [`PriceSource`] is the seam the aggregator depends on; implement it to plug
//! in another API or a fixture in tests. [`CoinGeckoPriceSource`] is the
//! default implementation.
//!
//! # Example: a fixed price source
//!
//! ```rust
//! use async_trait::async_trait;
//! use moodboard::{MarketPrices, PriceFetchError, PriceSnapshot, PriceSource};
//!
//! struct Fixed;
//!
//! #[async_trait]
//! impl PriceSource for Fixed {
//!     async fn fetch_prices(&self) -> Result<MarketPrices, PriceFetchError> {
//!         Ok(MarketPrices {
//!             btc: PriceSnapshot { usd_price: Some(60_000.0), change_24h_percent: Some(1.5) },
//!             eth: PriceSnapshot::EMPTY,
//!         })
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::{errors::PriceFetchError, types::price::MarketPrices};

mod coingecko;

pub use coingecko::CoinGeckoPriceSource;

/// Source of BTC and ETH spot prices with 24h change.
///
/// Implementations perform shape validation only: fields the API omits come
/// back as `None` rather than as an error. An `Err` means nothing usable was
/// received at all.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch a fresh snapshot; implementations must not cache.
    async fn fetch_prices(&self) -> Result<MarketPrices, PriceFetchError>;
}
