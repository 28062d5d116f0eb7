//! Error types for the price API.

use alloy_transport_http::reqwest;

/// Errors that can occur while reading spot prices.
///
/// Missing or ill-typed fields in an otherwise valid JSON body are not errors;
/// they surface as absent values in [`crate::PriceSnapshot`].
#[derive(Debug, thiserror::Error)]
pub enum PriceFetchError {
    /// The request could not be sent or the body could not be read.
    #[error("price request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("price API returned status {0}")]
    Status(reqwest::StatusCode),

    /// The body was not valid JSON.
    #[error("could not parse price response: {0}")]
    Parse(#[source] serde_json::Error),

    /// The configured price URL is not valid.
    #[error("invalid price API URL {url}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// The parse failure
        #[source]
        source: url::ParseError,
    },
}
