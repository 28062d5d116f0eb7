//! CoinGecko `simple/price` client

use std::time::Duration;

use alloy_transport_http::reqwest;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, Instrument};
use url::Url;

use super::PriceSource;
use crate::{
    config::MoodboardConfig,
    errors::{MoodboardError, PriceFetchError},
    provider::build_http_client,
    spans,
    transport::endpoint_label,
    types::price::{Asset, MarketPrices, PriceSnapshot},
};

/// Reads BTC and ETH from CoinGecko's `simple/price` endpoint.
///
/// Request shape:
/// `GET {base}?ids=bitcoin,ethereum&vs_currencies=usd&include_24hr_change=true`
///
/// Response shape (fields may be missing):
/// `{ "bitcoin": { "usd": 1.0, "usd_24h_change": -0.5 }, "ethereum": { ... } }`
#[derive(Debug, Clone)]
pub struct CoinGeckoPriceSource {
    client: reqwest::Client,
    url: Url,
}

impl CoinGeckoPriceSource {
    /// Create a client for a `simple/price` compatible base URL
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MoodboardError> {
        let url = simple_price_url(base_url)?;
        let client = build_http_client(Some(timeout)).map_err(MoodboardError::HttpClient)?;
        Ok(Self { client, url })
    }

    /// Create a client from configuration
    pub fn from_config(config: &MoodboardConfig) -> Result<Self, MoodboardError> {
        Self::new(&config.price_api_url, config.price_timeout)
    }

    /// Full request URL including the query
    pub fn request_url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PriceSource for CoinGeckoPriceSource {
    async fn fetch_prices(&self) -> Result<MarketPrices, PriceFetchError> {
        let span = spans::fetch_prices(&endpoint_label(&self.url));

        async {
            let response = self
                .client
                .get(self.url.clone())
                .send()
                .await
                .map_err(PriceFetchError::Request)?;

            let status = response.status();
            if !status.is_success() {
                return Err(PriceFetchError::Status(status));
            }

            let bytes = response.bytes().await.map_err(PriceFetchError::Request)?;
            let body: Value = serde_json::from_slice(&bytes).map_err(PriceFetchError::Parse)?;
            let prices = parse_simple_price(&body);

            for asset in Asset::ALL {
                let snapshot = prices.get(asset);
                debug!(
                    asset = asset.symbol(),
                    usd = ?snapshot.usd_price,
                    change_24h = ?snapshot.change_24h_percent,
                    "Spot price"
                );
            }
            Ok(prices)
        }
        .instrument(span)
        .await
    }
}

/// Append the fixed query to the configured base URL.
fn simple_price_url(base_url: &str) -> Result<Url, PriceFetchError> {
    let mut url = Url::parse(base_url).map_err(|source| PriceFetchError::InvalidUrl {
        url: base_url.to_string(),
        source,
    })?;

    let ids: Vec<&str> = Asset::ALL.iter().map(Asset::api_id).collect();
    url.query_pairs_mut()
        .append_pair("ids", &ids.join(","))
        .append_pair("vs_currencies", "usd")
        .append_pair("include_24hr_change", "true");
    Ok(url)
}

/// Shape-validate a `simple/price` body; anything missing or non-numeric is absent.
pub(crate) fn parse_simple_price(body: &Value) -> MarketPrices {
    let snapshot = |asset: Asset| {
        let entry = body.get(asset.api_id());
        let field = |name: &str| entry.and_then(|e| e.get(name)).and_then(Value::as_f64);
        PriceSnapshot {
            usd_price: field("usd"),
            change_24h_percent: field("usd_24h_change"),
        }
    };

    MarketPrices {
        btc: snapshot(Asset::Bitcoin),
        eth: snapshot(Asset::Ethereum),
    }
}
