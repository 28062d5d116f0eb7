// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer utilities for Alloy RPC clients.
//!
//! [`LoggingLayer`] is a Tower layer that wraps every JSON-RPC request in a
//! tracing span tagged with the endpoint host, method and duration.
//!
//! ```rust,ignore
//! use moodboard::transport::LoggingLayer;
//! use alloy_rpc_client::ClientBuilder;
//!
//! let client = ClientBuilder::default()
//!     .layer(LoggingLayer::for_endpoint(&rpc_url))
//!     .http(rpc_url);
//! ```

mod logging;

pub(crate) use logging::endpoint_label;
pub use logging::{LoggingLayer, LoggingService};
