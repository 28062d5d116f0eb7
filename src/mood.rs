//! Market mood scoring
//!
//! [`compute_mood`] reduces price changes and gas levels to a bounded score in
//! `[0, 100]` with an explanation. It is a pure function of its input.
//!
//! Components:
//! - volatility: mean absolute 24h change of BTC and ETH, worth up to 40 points
//! - heat: mean of per-chain gas buckets, worth up to 30 points
//! - trend: mean signed 24h change, worth -30..=30 points, shifted by 30
//!
//! ```rust
//! use moodboard::{compute_mood, Gwei, MoodBucket, MoodInput};
//!
//! let mood = compute_mood(&MoodInput {
//!     btc_change: Some(2.0),
//!     eth_change: Some(2.0),
//!     eth_gas_gwei: Some(Gwei::new(20)),
//!     base_gas_gwei: Some(Gwei::new(3)),
//! });
//!
//! assert_eq!(mood.score, 59);
//! assert_eq!(mood.bucket, MoodBucket::Greed);
//! ```

use serde::Serialize;

use crate::types::wei::Gwei;

/// Heat factor used when a chain's gas reading is unknown
const UNKNOWN_GAS_HEAT: f64 = 0.3;

/// Gas thresholds in gwei: (cool ceiling, warm ceiling)
const ETH_GAS_THRESHOLDS: (u64, u64) = (15, 30);
const BASE_GAS_THRESHOLDS: (u64, u64) = (1, 5);

const VOLATILITY_MAX_POINTS: f64 = 40.0;
const HEAT_MAX_POINTS: f64 = 30.0;
const TREND_MAX_POINTS: f64 = 30.0;
/// Percent change at which volatility and trend saturate
const SATURATION_PERCENT: f64 = 10.0;

/// Inputs to the scorer; every field may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoodInput {
    /// BTC 24h change in percent
    pub btc_change: Option<f64>,
    /// ETH 24h change in percent
    pub eth_change: Option<f64>,
    /// Ethereum mainnet gas
    pub eth_gas_gwei: Option<Gwei>,
    /// Base gas
    pub base_gas_gwei: Option<Gwei>,
}

/// Mood label, selected by inclusive upper bound on the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoodBucket {
    /// 0..=25
    #[serde(rename = "Capitulation 😵")]
    Capitulation,
    /// 26..=45
    #[serde(rename = "Fear 😨")]
    Fear,
    /// 46..=55
    #[serde(rename = "Neutral 😐")]
    Neutral,
    /// 56..=75
    #[serde(rename = "Greed 😏")]
    Greed,
    /// 76..=100
    #[serde(rename = "Euphoria 🤩")]
    Euphoria,
}

impl MoodBucket {
    /// Bucket for a score
    pub fn from_score(score: f64) -> Self {
        if score <= 25.0 {
            Self::Capitulation
        } else if score <= 45.0 {
            Self::Fear
        } else if score <= 55.0 {
            Self::Neutral
        } else if score <= 75.0 {
            Self::Greed
        } else {
            Self::Euphoria
        }
    }

    /// Display label including its emoji
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Capitulation => "Capitulation 😵",
            Self::Fear => "Fear 😨",
            Self::Neutral => "Neutral 😐",
            Self::Greed => "Greed 😏",
            Self::Euphoria => "Euphoria 🤩",
        }
    }

    /// Display color as a hex token
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Capitulation => "#1f2937",
            Self::Fear => "#ef4444",
            Self::Neutral => "#9ca3af",
            Self::Greed => "#f59e0b",
            Self::Euphoria => "#10b981",
        }
    }

    /// One-line description
    pub const fn blurb(&self) -> &'static str {
        match self {
            Self::Capitulation => "Risk-off, bruised sentiment.",
            Self::Fear => "High vol or weak trend.",
            Self::Neutral => "Balanced forces.",
            Self::Greed => "Heat rising, fees and price climbing.",
            Self::Euphoria => "Everything ripping. Careful out there.",
        }
    }
}

impl std::fmt::Display for MoodBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sub-scores behind a mood, rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodDetails {
    /// Mean absolute change, 2 decimals
    pub volatility: f64,
    /// Mean signed change, 2 decimals
    pub trend: f64,
    /// Gas heat as a percentage
    pub heat: u8,
}

/// Output of [`compute_mood`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodResult {
    /// Score in `[0, 100]`
    pub score: u8,
    pub bucket: MoodBucket,
    pub color: &'static str,
    pub details: MoodDetails,
    pub blurb: &'static str,
}

/// Score a set of market indicators.
///
/// Unknown price changes count as 0%; unknown gas counts as a heat factor of 0.3.
pub fn compute_mood(input: &MoodInput) -> MoodResult {
    let btc = input.btc_change.unwrap_or(0.0);
    let eth = input.eth_change.unwrap_or(0.0);

    let volatility = (btc.abs() + eth.abs()) / 2.0;
    let trend = (btc + eth) / 2.0;
    let heat = (heat_factor(input.eth_gas_gwei, ETH_GAS_THRESHOLDS)
        + heat_factor(input.base_gas_gwei, BASE_GAS_THRESHOLDS))
        / 2.0;

    let vol_score = (volatility / SATURATION_PERCENT * VOLATILITY_MAX_POINTS)
        .clamp(0.0, VOLATILITY_MAX_POINTS);
    let heat_score = (heat * HEAT_MAX_POINTS).clamp(0.0, HEAT_MAX_POINTS);
    let trend_score =
        (trend / SATURATION_PERCENT * TREND_MAX_POINTS).clamp(-TREND_MAX_POINTS, TREND_MAX_POINTS);

    let raw = vol_score + heat_score + (trend_score + TREND_MAX_POINTS);
    // `as` saturates and maps NaN to 0
    let score = raw.clamp(0.0, 100.0).round() as u8;
    let bucket = MoodBucket::from_score(f64::from(score));

    MoodResult {
        score,
        bucket,
        color: bucket.color(),
        details: MoodDetails {
            volatility: round_to(volatility, 2),
            trend: round_to(trend, 2),
            heat: (heat * 100.0).round() as u8,
        },
        blurb: bucket.blurb(),
    }
}

fn heat_factor(gas: Option<Gwei>, (cool, warm): (u64, u64)) -> f64 {
    match gas.map(|g| g.as_u64()) {
        None => UNKNOWN_GAS_HEAT,
        Some(g) if g <= cool => 0.2,
        Some(g) if g <= warm => 0.5,
        Some(_) => 1.0,
    }
}

/// Round half away from zero to `decimals` places.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
