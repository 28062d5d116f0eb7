// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based logging layer for Alloy RPC clients.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, trace, Instrument};
use url::Url;

/// A Tower layer that adds tracing to RPC requests.
///
/// Each request runs inside an `rpc_call` span that records the endpoint
/// host, the method and the elapsed time. Failures are logged at `debug`;
/// exhaustion of the fallback chain is reported by the gas oracle.
#[derive(Clone, Debug, Default)]
pub struct LoggingLayer {
    /// Host (never the full URL, which may embed an API key)
    endpoint: String,
    /// Whether to log request and response payloads
    log_payloads: bool,
}

impl LoggingLayer {
    /// Creates a logging layer labelled with the endpoint's host.
    pub fn for_endpoint(endpoint: &Url) -> Self {
        Self {
            endpoint: endpoint_label(endpoint),
            log_payloads: false,
        }
    }

    /// Enables `trace` logging of request and response payloads.
    pub fn with_payload_logging(mut self) -> Self {
        self.log_payloads = true;
        self
    }

    /// The endpoint label used in spans.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            endpoint: self.endpoint.clone(),
            log_payloads: self.log_payloads,
        }
    }
}

/// A Tower service that logs RPC requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    endpoint: String,
    log_payloads: bool,
}

impl<S> tower::Service<RequestPacket> for LoggingService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let log_payloads = self.log_payloads;
        let mut service = self.service.clone();
        let method = extract_method(&request);

        let span = tracing::debug_span!(
            "rpc_call",
            endpoint = %self.endpoint,
            method = %method,
            duration_ms = tracing::field::Empty,
        );

        Box::pin(
            async move {
                let start = Instant::now();

                if log_payloads {
                    trace!(request = ?request, "RPC request");
                }

                let result = service.call(request).await;
                let duration_ms = start.elapsed().as_millis() as u64;
                tracing::Span::current().record("duration_ms", duration_ms);

                match &result {
                    Ok(response) if log_payloads => {
                        trace!(response = ?response, duration_ms, "RPC response");
                    }
                    Ok(_) => debug!(duration_ms, "RPC response"),
                    Err(e) => debug!(error = %e, duration_ms, "RPC transport error"),
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Host and port of an endpoint, without path or query.
///
/// Keyed providers put credentials in the path, so only the authority is logged.
pub(crate) fn endpoint_label(endpoint: &Url) -> String {
    match (endpoint.host_str(), endpoint.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => endpoint.scheme().to_string(),
    }
}

/// Extract the RPC method name from a request packet.
fn extract_method(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [only] => only.method().to_string(),
            _ => format!("batch({} calls)", reqs.len()),
        },
    }
}
