//! One aggregation cycle: prices plus gas for Ethereum and Base
//!
//! [`IndicatorAggregator::snapshot`] runs the price fetch and both gas
//! oracles concurrently and merges the results into [`Indicators`]. Nothing is
//! cached between snapshots.

use alloy_chains::NamedChain;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn, Instrument};

use crate::{
    config::MoodboardConfig,
    errors::PriceFetchError,
    gas::GasOracle,
    mood::{compute_mood, MoodInput, MoodResult},
    price::PriceSource,
    provider::RpcCaller,
    spans,
    types::{
        gas::{GasReading, GasSource},
        price::MarketPrices,
        wei::Gwei,
    },
};

/// Provenance of each chain's gas value, `null` when no reading succeeded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GasSources {
    pub eth: Option<GasSource>,
    pub base: Option<GasSource>,
}

/// Raw indicators for one snapshot, serialized in camelCase.
///
/// ```json
/// {
///   "btcUsd": 64250.5, "btcChange24h": -1.2, "ethUsd": 3120.0, "ethChange24h": 0.4,
///   "ethGasGwei": 12, "baseGasGwei": null,
///   "sources": { "eth": { "endpoint": "https://cloudflare-eth.com/", "method": "eth_feeHistory" }, "base": null },
///   "fetchedAt": "2025-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    pub btc_usd: Option<f64>,
    pub btc_change_24h: Option<f64>,
    pub eth_usd: Option<f64>,
    pub eth_change_24h: Option<f64>,
    pub eth_gas_gwei: Option<Gwei>,
    pub base_gas_gwei: Option<Gwei>,
    pub sources: GasSources,
    pub fetched_at: DateTime<Utc>,
    /// Set when the price source failed; price fields are then all `null`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Indicators {
    /// Merge the results of one cycle.
    ///
    /// A price failure clears every price field and records the error; gas
    /// readings are kept either way.
    pub fn assemble(
        prices: Result<MarketPrices, PriceFetchError>,
        eth_gas: Option<GasReading>,
        base_gas: Option<GasReading>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let (prices, error) = match prices {
            Ok(prices) => (prices, None),
            Err(e) => (MarketPrices::default(), Some(e.to_string())),
        };

        Self {
            btc_usd: prices.btc.usd_price,
            btc_change_24h: prices.btc.change_24h_percent,
            eth_usd: prices.eth.usd_price,
            eth_change_24h: prices.eth.change_24h_percent,
            eth_gas_gwei: eth_gas.as_ref().map(|r| r.gwei),
            base_gas_gwei: base_gas.as_ref().map(|r| r.gwei),
            sources: GasSources {
                eth: eth_gas.map(|r| r.source),
                base: base_gas.map(|r| r.source),
            },
            fetched_at,
            error,
        }
    }

    /// Scorer input for these indicators
    pub fn mood_input(&self) -> MoodInput {
        MoodInput {
            btc_change: self.btc_change_24h,
            eth_change: self.eth_change_24h,
            eth_gas_gwei: self.eth_gas_gwei,
            base_gas_gwei: self.base_gas_gwei,
        }
    }

    /// Score these indicators
    pub fn mood(&self) -> MoodResult {
        compute_mood(&self.mood_input())
    }
}

/// Runs price and gas fetches for Ethereum mainnet and Base.
pub struct IndicatorAggregator<C, P> {
    prices: P,
    eth_gas: GasOracle<C>,
    base_gas: GasOracle<C>,
}

impl<C: RpcCaller + Clone, P: PriceSource> IndicatorAggregator<C, P> {
    /// Build both gas oracles from configuration, sharing one caller
    pub fn new(config: &MoodboardConfig, caller: C, prices: P) -> Self {
        Self {
            prices,
            eth_gas: GasOracle::from_config(NamedChain::Mainnet, config, caller.clone()),
            base_gas: GasOracle::from_config(NamedChain::Base, config, caller),
        }
    }
}

impl<C: RpcCaller, P: PriceSource> IndicatorAggregator<C, P> {
    /// Assemble from prebuilt parts
    pub fn from_parts(prices: P, eth_gas: GasOracle<C>, base_gas: GasOracle<C>) -> Self {
        Self {
            prices,
            eth_gas,
            base_gas,
        }
    }

    /// Ethereum mainnet oracle
    pub fn eth_oracle(&self) -> &GasOracle<C> {
        &self.eth_gas
    }

    /// Base oracle
    pub fn base_oracle(&self) -> &GasOracle<C> {
        &self.base_gas
    }

    /// Fetch a fresh set of indicators.
    ///
    /// The three fetches run concurrently and are all awaited; none of them
    /// can fail the snapshot.
    pub async fn snapshot(&self) -> Indicators {
        async {
            let (prices, eth_gas, base_gas) = tokio::join!(
                self.prices.fetch_prices(),
                self.eth_gas.latest_gas(),
                self.base_gas.latest_gas(),
            );

            if let Err(e) = &prices {
                warn!(error = %e, "Price fetch failed, price fields will be null");
            }

            let indicators = Indicators::assemble(prices, eth_gas, base_gas, Utc::now());
            info!(
                eth_gas = ?indicators.eth_gas_gwei,
                base_gas = ?indicators.base_gas_gwei,
                price_error = indicators.error.is_some(),
                "Indicators assembled"
            );
            indicators
        }
        .instrument(spans::aggregate_indicators())
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{gas::GasMethod, price::PriceSnapshot};
    use alloy_transport_http::reqwest::StatusCode;
    use chrono::TimeZone;
    use url::Url;

    fn reading(gwei: u64, endpoint: &str, method: GasMethod) -> GasReading {
        GasReading {
            gwei: Gwei::new(gwei),
            source: GasSource {
                endpoint: Url::parse(endpoint).unwrap(),
                method,
            },
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn prices() -> MarketPrices {
        MarketPrices {
            btc: PriceSnapshot {
                usd_price: Some(64250.5),
                change_24h_percent: Some(-1.5),
            },
            eth: PriceSnapshot {
                usd_price: Some(3120.0),
                change_24h_percent: None,
            },
        }
    }

    #[test]
    fn test_assemble_success() {
        let indicators = Indicators::assemble(
            Ok(prices()),
            Some(reading(12, "https://cloudflare-eth.com", GasMethod::FeeHistory)),
            None,
            fixed_time(),
        );

        assert_eq!(indicators.btc_usd, Some(64250.5));
        assert_eq!(indicators.btc_change_24h, Some(-1.5));
        assert_eq!(indicators.eth_change_24h, None);
        assert_eq!(indicators.eth_gas_gwei, Some(Gwei::new(12)));
        assert_eq!(indicators.base_gas_gwei, None);
        assert_eq!(
            indicators.sources.eth.as_ref().map(|s| s.method),
            Some(GasMethod::FeeHistory)
        );
        assert!(indicators.sources.base.is_none());
        assert!(indicators.error.is_none());
    }

    #[test]
    fn test_assemble_price_failure_keeps_gas() {
        let indicators = Indicators::assemble(
            Err(PriceFetchError::Status(StatusCode::TOO_MANY_REQUESTS)),
            Some(reading(12, "https://cloudflare-eth.com", GasMethod::FeeHistory)),
            Some(reading(2, "https://mainnet.base.org", GasMethod::GasPrice)),
            fixed_time(),
        );

        assert_eq!(indicators.btc_usd, None);
        assert_eq!(indicators.btc_change_24h, None);
        assert_eq!(indicators.eth_usd, None);
        assert_eq!(indicators.eth_change_24h, None);
        assert_eq!(indicators.eth_gas_gwei, Some(Gwei::new(12)));
        assert_eq!(indicators.base_gas_gwei, Some(Gwei::new(2)));
        assert!(indicators.error.as_deref().is_some_and(|e| e.contains("429")));
    }

    #[test]
    fn test_json_shape() {
        let indicators = Indicators::assemble(
            Ok(prices()),
            Some(reading(12, "https://cloudflare-eth.com", GasMethod::FeeHistory)),
            None,
            fixed_time(),
        );
        let json = serde_json::to_value(&indicators).unwrap();

        assert_eq!(json["btcUsd"], 64250.5);
        assert_eq!(json["btcChange24h"], -1.5);
        assert_eq!(json["ethUsd"], 3120.0);
        assert!(json["ethChange24h"].is_null());
        assert_eq!(json["ethGasGwei"], 12);
        assert!(json["baseGasGwei"].is_null());
        assert_eq!(json["sources"]["eth"]["endpoint"], "https://cloudflare-eth.com/");
        assert_eq!(json["sources"]["eth"]["method"], "eth_feeHistory");
        assert!(json["sources"]["base"].is_null());
        assert_eq!(json["fetchedAt"], "2025-01-01T12:00:00Z");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_marker_serialized() {
        let indicators = Indicators::assemble(
            Err(PriceFetchError::Status(StatusCode::BAD_GATEWAY)),
            None,
            None,
            fixed_time(),
        );
        let json = serde_json::to_value(&indicators).unwrap();

        assert!(json["error"].is_string());
        assert!(json["btcUsd"].is_null());
        assert!(json["sources"]["eth"].is_null());
    }

    #[test]
    fn test_mood_uses_indicators() {
        let indicators = Indicators::assemble(Ok(MarketPrices::default()), None, None, fixed_time());
        let mood = indicators.mood();

        assert_eq!(mood.score, 39);
        assert_eq!(indicators.mood_input(), MoodInput::default());
    }
}
