//! Transformation module.
//!
//! This module handles the Temple → Bitwave conversion:
//! - Fees: advisory scan of the fee columns
//! - Normalize: numeric/timestamp coercion with explicit defaults
//! - Aggregate: fills grouped into trades
//! - Legs: acquire/dispose ledger rows per trade
//! - Pipeline: end-to-end orchestration

pub mod aggregate;
pub mod fees;
pub mod legs;
pub mod normalize;
pub mod pipeline;

pub use aggregate::aggregate_fills;
pub use fees::{scan_fees, FeeScan};
pub use legs::build_legs;
pub use normalize::normalize_rows;
pub use pipeline::*;
