// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types shared across moodboard.
//!
//! - Gwei amounts and the wei-hex to gwei converter
//! - Gas readings with their provenance
//! - Spot price snapshots

pub mod gas;
pub mod price;
pub mod wei;

// Note: Public types are re-exported from lib.rs, not here
