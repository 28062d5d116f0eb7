//! Error types for individual JSON-RPC attempts.
//!
//! Every variant carries the endpoint and method so a log line is enough to
//! tell which candidate in the fallback chain failed and why.

use std::time::Duration;

/// Errors that can occur during one JSON-RPC call to one endpoint.
///
/// # Examples
///
/// ```rust
/// use moodboard::RpcError;
/// use std::time::Duration;
///
/// let error = RpcError::timeout("https://rpc.example", "eth_gasPrice", Duration::from_secs(8));
/// assert!(error.is_timeout());
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The call did not complete within the configured timeout.
    #[error("{method} on {endpoint} timed out after {}ms", .timeout.as_millis())]
    Timeout {
        /// Endpoint the call was sent to
        endpoint: String,
        /// JSON-RPC method name
        method: &'static str,
        /// The timeout that elapsed
        timeout: Duration,
    },

    /// Transport-level failure: connection refused, DNS, TLS, non-2xx HTTP
    /// status or an undecodable response body.
    #[error("{method} on {endpoint} failed: {source}")]
    Transport {
        /// Endpoint the call was sent to
        endpoint: String,
        /// JSON-RPC method name
        method: &'static str,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The node answered with a JSON-RPC `error` object.
    #[error("{method} on {endpoint} returned error {code}: {message}")]
    ErrorResponse {
        /// Endpoint the call was sent to
        endpoint: String,
        /// JSON-RPC method name
        method: &'static str,
        /// JSON-RPC error code
        code: i64,
        /// JSON-RPC error message
        message: String,
    },

    /// The response had neither an `error` nor a usable `result`.
    #[error("{method} on {endpoint} returned no result")]
    MissingResult {
        /// Endpoint the call was sent to
        endpoint: String,
        /// JSON-RPC method name
        method: &'static str,
    },
}

impl RpcError {
    /// Create a `Timeout` error.
    pub fn timeout(endpoint: impl Into<String>, method: &'static str, timeout: Duration) -> Self {
        RpcError::Timeout {
            endpoint: endpoint.into(),
            method,
            timeout,
        }
    }

    /// Create a `Transport` error from any error type.
    pub fn transport(
        endpoint: impl Into<String>,
        method: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::Transport {
            endpoint: endpoint.into(),
            method,
            source: Box::new(source),
        }
    }

    /// Create an `ErrorResponse` error.
    pub fn error_response(
        endpoint: impl Into<String>,
        method: &'static str,
        code: i64,
        message: impl Into<String>,
    ) -> Self {
        RpcError::ErrorResponse {
            endpoint: endpoint.into(),
            method,
            code,
            message: message.into(),
        }
    }

    /// Create a `MissingResult` error.
    pub fn missing_result(endpoint: impl Into<String>, method: &'static str) -> Self {
        RpcError::MissingResult {
            endpoint: endpoint.into(),
            method,
        }
    }

    /// Returns `true` if the call was cut off by the timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RpcError::Timeout { .. })
    }

    /// The JSON-RPC method of the failed call.
    pub fn method(&self) -> &'static str {
        match self {
            RpcError::Timeout { method, .. }
            | RpcError::Transport { method, .. }
            | RpcError::ErrorResponse { method, .. }
            | RpcError::MissingResult { method, .. } => *method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let error = RpcError::timeout("https://a.example", "eth_feeHistory", Duration::from_secs(8));
        assert_eq!(
            error.to_string(),
            "eth_feeHistory on https://a.example timed out after 8000ms"
        );
        assert!(error.is_timeout());
    }

    #[test]
    fn test_error_response_display() {
        let error = RpcError::error_response("https://a.example", "eth_gasPrice", -32601, "method not found");
        assert_eq!(
            error.to_string(),
            "eth_gasPrice on https://a.example returned error -32601: method not found"
        );
        assert!(!error.is_timeout());
    }

    #[test]
    fn test_transport_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = RpcError::transport("https://a.example", "eth_getBlockByNumber", io);
        assert_eq!(error.method(), "eth_getBlockByNumber");
        assert!(error.source().is_some());
    }
}
