// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Spot price snapshots.

use serde::{Deserialize, Serialize};

/// Assets tracked by the price fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    /// BTC
    Bitcoin,
    /// ETH
    Ethereum,
}

impl Asset {
    /// Every tracked asset
    pub const ALL: [Asset; 2] = [Asset::Bitcoin, Asset::Ethereum];

    /// Identifier used by the price API
    pub const fn api_id(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "bitcoin",
            Asset::Ethereum => "ethereum",
        }
    }

    /// Ticker symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "BTC",
            Asset::Ethereum => "ETH",
        }
    }
}

/// USD spot price and 24h change for one asset.
///
/// The two fields are independent; either may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Spot price in USD
    pub usd_price: Option<f64>,
    /// 24h change in percent, signed
    pub change_24h_percent: Option<f64>,
}

impl PriceSnapshot {
    /// A snapshot with both fields absent
    pub const EMPTY: Self = Self {
        usd_price: None,
        change_24h_percent: None,
    };
}

/// Snapshots for every tracked asset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketPrices {
    /// Bitcoin
    pub btc: PriceSnapshot,
    /// Ether
    pub eth: PriceSnapshot,
}

impl MarketPrices {
    /// Snapshot for one asset
    pub fn get(&self, asset: Asset) -> PriceSnapshot {
        match asset {
            Asset::Bitcoin => self.btc,
            Asset::Ethereum => self.eth,
        }
    }
}
