use serde::Serialize;
use tracing::info;

use crate::{
    aggregator::{IndicatorAggregator, Indicators},
    config::MoodboardConfig,
    errors::MoodboardError,
    mood::MoodResult,
    price::CoinGeckoPriceSource,
    provider::HttpRpcCaller,
};

const RUST_LOG_VAR: &str = "RUST_LOG";
const LOG_FORMAT_VAR: &str = "LOG_FORMAT";
const DEFAULT_LOG_FILTER: &str = "info";

/// Subscriber settings for the binary.
///
/// `RUST_LOG` selects verbosity, `LOG_FORMAT=json` switches to JSON lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// `EnvFilter` directives
    pub filter: String,
    /// Emit JSON lines instead of the human-readable format
    pub json: bool,
}

impl LogSettings {
    /// Read from the process environment after loading `.env`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Read from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = lookup(RUST_LOG_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let json = lookup(LOG_FORMAT_VAR)
            .is_some_and(|format| format.trim().eq_ignore_ascii_case("json"));

        Self { filter, json }
    }
}

/// What the binary prints for one snapshot.
#[derive(Debug, Serialize)]
pub struct Report {
    pub indicators: Indicators,
    pub mood: MoodResult,
}

impl Report {
    /// Score a snapshot
    pub fn new(indicators: Indicators) -> Self {
        let mood = indicators.mood();
        Self { indicators, mood }
    }
}

/// Main entry point for the application.
///
/// Loads configuration (including `.env`), takes one snapshot and prints it
/// as pretty JSON to stdout.
pub async fn run() -> Result<(), MoodboardError> {
    let config = MoodboardConfig::from_env()?;

    let caller = HttpRpcCaller::from_config(&config)?;
    let prices = CoinGeckoPriceSource::from_config(&config)?;
    let aggregator = IndicatorAggregator::new(&config, caller, prices);
    info!(
        eth_endpoints = aggregator.eth_oracle().endpoints().len(),
        base_endpoints = aggregator.base_oracle().endpoints().len(),
        rpc_timeout_ms = config.rpc_timeout.as_millis() as u64,
        log_rpc_payloads = config.log_rpc_payloads,
        "Configuration loaded"
    );

    let report = Report::new(aggregator.snapshot().await);
    let rendered = serde_json::to_string_pretty(&report).map_err(MoodboardError::Output)?;
    println!("{rendered}");

    Ok(())
}
