//! Error types for the moodboard library.
//!
//! Each concern has its own error type:
//! - [`RpcError`] - a single JSON-RPC attempt against one endpoint failed
//! - [`PriceFetchError`] - the price API could not be read
//! - [`ConfigError`] - operator configuration is malformed
//!
//! [`MoodboardError`] covers setup: configuration, HTTP client construction
//! and output rendering.
//!
//! [`RpcError`] never leaves the gas oracle: every failed attempt is logged and
//! the next candidate is tried. Exhaustion is an absent reading, not an error.
//! Likewise a failed price fetch becomes the snapshot's `error` marker.
//!
//! # Example
//!
//! ```rust
//! use moodboard::{MoodboardConfig, MoodboardError};
//!
//! fn load() -> Result<MoodboardConfig, MoodboardError> {
//!     // ConfigError converts into MoodboardError via `?`
//!     let config = MoodboardConfig::from_env()?;
//!     Ok(config)
//! }
//! ```

use alloy_transport_http::reqwest;

mod config;
mod price;
mod rpc;

pub use config::ConfigError;
pub use price::PriceFetchError;
pub use rpc::RpcError;

/// Unified error type for all moodboard operations.
#[derive(Debug, thiserror::Error)]
pub enum MoodboardError {
    /// The price API could not be set up (e.g. its URL does not parse).
    #[error("Price fetch error: {0}")]
    Price(#[from] PriceFetchError),

    /// Error while loading configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The shared HTTP client could not be built (TLS backend, headers).
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// A snapshot could not be rendered as JSON.
    #[error("Output error: {0}")]
    Output(#[source] serde_json::Error),
}
