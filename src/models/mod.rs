//! Domain models for the conversion pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`FillRow`] - one normalized input fill from the Temple export
//! - [`Side`] - trade direction, carrying the ticker policy table
//! - [`AggregatedTrade`] - one record per distinct `trade_id`
//! - [`LedgerRow`] - the fixed 21-column Bitwave output row

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Side & Tickers
// =============================================================================

/// Asset symbol used in the destination schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ticker {
    #[serde(rename = "USDC")]
    Usdc,
    #[serde(rename = "CANTON")]
    Canton,
}

impl Ticker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usdc => "USDC",
            Self::Canton => "CANTON",
        }
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade direction.
///
/// Anything that is not literally `"sell"` after trimming and lowercasing
/// is treated as a buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Sell,
    Buy,
}

impl Side {
    /// Parse a raw side value, case and whitespace insensitive.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "sell" => Self::Sell,
            _ => Self::Buy,
        }
    }

    /// Ticker policy table: which asset each leg acquires and disposes.
    pub fn tickers(self) -> LegTickers {
        match self {
            // Selling CANTON, acquiring USDC
            Self::Sell => LegTickers {
                acquire: Ticker::Usdc,
                dispose: Ticker::Canton,
            },
            // Buying: acquiring CANTON, disposing USDC
            Self::Buy => LegTickers {
                acquire: Ticker::Canton,
                dispose: Ticker::Usdc,
            },
        }
    }
}

/// Acquire/dispose ticker pair for one trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegTickers {
    pub acquire: Ticker,
    pub dispose: Ticker,
}

// =============================================================================
// Input & Aggregation
// =============================================================================

/// One normalized fill from the Temple export.
///
/// Amounts are already coerced to numeric (zero on failure) and the
/// timestamp to a UTC instant (`None` on failure). Immutable once built.
#[derive(Debug, Clone)]
pub struct FillRow {
    pub trade_id: String,
    /// Raw side value; normalized only where it is consumed.
    pub side: String,
    pub seller_net: f64,
    pub buyer_net: f64,
    pub created_at: Option<DateTime<Utc>>,
}

/// One record per distinct `trade_id` present in the input.
#[derive(Debug, Clone)]
pub struct AggregatedTrade {
    pub trade_id: String,
    /// Raw side of the first fill encountered in the group.
    pub side: String,
    pub seller_net_total: f64,
    pub buyer_net_total: f64,
    /// Minimum non-null timestamp of the group, `None` if all were null.
    pub earliest_time: Option<DateTime<Utc>>,
}

// =============================================================================
// Output
// =============================================================================

/// Transaction type of an output leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "tradeAcquire")]
    TradeAcquire,
    #[serde(rename = "tradeDispose")]
    TradeDispose,
}

/// One Bitwave ledger row.
///
/// Field order matches the destination schema exactly; the output CSV
/// header is this order. The empty-string fields are placeholders the
/// destination requires but this converter never populates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    /// Fresh 32-hex UUID, unique per row.
    pub id: String,
    pub remote_contact_id: String,
    /// Monetary amount, rounded to 6 decimal places.
    pub amount: f64,
    pub amount_ticker: Ticker,
    pub cost: String,
    pub cost_ticker: String,
    pub fee: String,
    pub fee_ticker: String,
    /// `M/D/YY HH:MM` from the trade's earliest UTC timestamp, or empty.
    pub time: String,
    /// Source `trade_id`, copied verbatim.
    pub blockchain_id: String,
    pub memo: String,
    pub transaction_type: TransactionType,
    pub account_id: String,
    pub contact_id: String,
    pub category_id: String,
    /// Literal `"FALSE"`.
    pub tax_exempt: String,
    /// Synthetic 1-based counter, shared by the two legs of one trade.
    pub trade_id: u64,
    pub description: String,
    pub from_address: String,
    pub to_address: String,
    pub group_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_raw() {
        assert_eq!(Side::from_raw("sell"), Side::Sell);
        assert_eq!(Side::from_raw(" Sell "), Side::Sell);
        assert_eq!(Side::from_raw("SELL"), Side::Sell);
        assert_eq!(Side::from_raw("buy"), Side::Buy);
        assert_eq!(Side::from_raw(""), Side::Buy);
        // Any non-"sell" value is treated as a buy
        assert_eq!(Side::from_raw("hold"), Side::Buy);
    }

    #[test]
    fn test_ticker_policy_sell() {
        let tickers = Side::Sell.tickers();
        assert_eq!(tickers.acquire, Ticker::Usdc);
        assert_eq!(tickers.dispose, Ticker::Canton);
    }

    #[test]
    fn test_ticker_policy_buy() {
        let tickers = Side::Buy.tickers();
        assert_eq!(tickers.acquire, Ticker::Canton);
        assert_eq!(tickers.dispose, Ticker::Usdc);
    }

    #[test]
    fn test_ticker_display() {
        assert_eq!(Ticker::Usdc.to_string(), "USDC");
        assert_eq!(Ticker::Canton.to_string(), "CANTON");
    }
}
