// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gwei amounts and conversion from JSON-RPC wei quantities.
//!
//! Nodes report fees as `0x`-prefixed hex wei. Those can exceed what an `f64`
//! represents exactly, so parsing goes through [`U256`] and only the truncated
//! gwei result is narrowed.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wei per gwei.
pub const WEI_PER_GWEI: u64 = 1_000_000_000;

/// An integer amount of gwei (10^-9 ETH).
///
/// # Examples
///
/// ```
/// use moodboard::Gwei;
///
/// let fee = Gwei::new(12);
/// assert_eq!(fee.as_u64(), 12);
/// assert_eq!(fee.to_string(), "12 gwei");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Gwei(u64);

impl Gwei {
    /// Zero gwei
    pub const ZERO: Self = Self(0);

    /// Create a new gwei amount
    pub const fn new(gwei: u64) -> Self {
        Self(gwei)
    }

    /// Get the inner value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Lossy conversion for scoring and display
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Gwei {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Gwei {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} gwei", self.0)
    }
}

/// Convert a `0x`-prefixed hex wei quantity into whole gwei, truncating.
///
/// Returns `None` when the prefix is missing, there are no digits, a digit is
/// not hex, the value overflows 256 bits, or the gwei result does not fit in
/// a `u64`. Never panics.
///
/// # Examples
///
/// ```
/// use moodboard::{hex_to_gwei, Gwei};
///
/// // 12.9 gwei truncates to 12
/// assert_eq!(hex_to_gwei("0x300e66100"), Some(Gwei::new(12)));
/// assert_eq!(hex_to_gwei("12"), None);
/// assert_eq!(hex_to_gwei("0x"), None);
/// ```
pub fn hex_to_gwei(hex: &str) -> Option<Gwei> {
    let digits = hex.strip_prefix("0x")?;
    if digits.is_empty() {
        return None;
    }
    let wei = U256::from_str_radix(digits, 16).ok()?;
    let gwei = wei / U256::from(WEI_PER_GWEI);
    u64::try_from(gwei).ok().map(Gwei)
}

/// Convert an optional JSON value into gwei.
///
/// Absent values and anything that is not a JSON string yield `None`;
/// strings go through [`hex_to_gwei`].
pub fn gwei_from_json(value: Option<&Value>) -> Option<Gwei> {
    value.and_then(Value::as_str).and_then(hex_to_gwei)
}

/// Encode a gwei amount as the `0x`-prefixed hex wei quantity a node would send.
pub fn gwei_to_hex_wei(gwei: Gwei) -> String {
    let wei = U256::from(gwei.0) * U256::from(WEI_PER_GWEI);
    format!("0x{wei:x}")
}
