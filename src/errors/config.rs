//! Error types for loading configuration.

/// Errors that can occur while building a [`crate::MoodboardConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An RPC or API URL does not parse.
    #[error("Invalid URL in {var}: {value}")]
    InvalidUrl {
        /// Environment variable or setting name
        var: &'static str,
        /// The rejected value
        value: String,
        /// The parse failure
        #[source]
        source: url::ParseError,
    },

    /// A millisecond value does not parse or is zero.
    #[error("Invalid duration in {var}: {value} (expected a positive number of milliseconds)")]
    InvalidDuration {
        /// Environment variable name
        var: &'static str,
        /// The rejected value
        value: String,
    },
}

impl ConfigError {
    /// Create an `InvalidUrl` error.
    pub fn invalid_url(var: &'static str, value: impl Into<String>, source: url::ParseError) -> Self {
        ConfigError::InvalidUrl {
            var,
            value: value.into(),
            source,
        }
    }

    /// Create an `InvalidDuration` error.
    pub fn invalid_duration(var: &'static str, value: impl Into<String>) -> Self {
        ConfigError::InvalidDuration {
            var,
            value: value.into(),
        }
    }
}
