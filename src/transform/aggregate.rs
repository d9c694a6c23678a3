//! Group fills by trade identifier.
//!
//! Several fills may compose one logical trade; this stage reduces them
//! to one [`AggregatedTrade`] per distinct `trade_id`:
//!
//! ```text
//! Fills (flat rows)                  Aggregated trades
//! ┌──────────────────────────┐       ┌──────────────────────────────┐
//! │ T1  buy   net 10   9:00  │       │ T1  buy   net 15   9:00      │
//! │ T1  buy   net  5  10:00  │  →    ├──────────────────────────────┤
//! │ T2  sell  net 80   9:30  │       │ T2  sell  net 80   9:30      │
//! └──────────────────────────┘       └──────────────────────────────┘
//! ```
//!
//! Trades come out in first-appearance order of their `trade_id`, so a
//! given input always produces the same output ordering.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::api::logs::log_warning;
use crate::models::{AggregatedTrade, FillRow, Side};

/// Reduce fills to one record per distinct `trade_id`.
///
/// Per group: `side` is the first fill's raw value, net amounts are
/// summed, and `earliest_time` is the minimum non-null timestamp.
pub fn aggregate_fills(rows: &[FillRow]) -> Vec<AggregatedTrade> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, TradeBuilder> = HashMap::new();

    for row in rows {
        let builder = groups.entry(row.trade_id.clone()).or_insert_with(|| {
            order.push(row.trade_id.clone());
            TradeBuilder::new(row)
        });
        builder.add(row);
    }

    order
        .into_iter()
        .map(|trade_id| {
            groups
                .remove(&trade_id)
                .expect("every ordered trade_id has a group")
                .build()
        })
        .collect()
}

/// Accumulator for one trade group.
struct TradeBuilder {
    trade_id: String,
    side: String,
    seller_net_total: f64,
    buyer_net_total: f64,
    earliest_time: Option<DateTime<Utc>>,
}

impl TradeBuilder {
    fn new(first: &FillRow) -> Self {
        Self {
            trade_id: first.trade_id.clone(),
            side: first.side.clone(),
            seller_net_total: 0.0,
            buyer_net_total: 0.0,
            earliest_time: None,
        }
    }

    fn add(&mut self, row: &FillRow) {
        // First side wins; disagreement is surfaced but never alters output.
        if Side::from_raw(&row.side) != Side::from_raw(&self.side) {
            log_warning(format!(
                "Trade {}: fills disagree on side ('{}' vs '{}')",
                self.trade_id,
                row.side.trim(),
                self.side.trim()
            ));
        }

        self.seller_net_total += row.seller_net;
        self.buyer_net_total += row.buyer_net;

        if let Some(t) = row.created_at {
            self.earliest_time = Some(match self.earliest_time {
                Some(current) => current.min(t),
                None => t,
            });
        }
    }

    fn build(self) -> AggregatedTrade {
        AggregatedTrade {
            trade_id: self.trade_id,
            side: self.side,
            seller_net_total: self.seller_net_total,
            buyer_net_total: self.buyer_net_total,
            earliest_time: self.earliest_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fill(
        trade_id: &str,
        side: &str,
        seller_net: f64,
        buyer_net: f64,
        created_at: Option<DateTime<Utc>>,
    ) -> FillRow {
        FillRow {
            trade_id: trade_id.to_string(),
            side: side.to_string(),
            seller_net,
            buyer_net,
            created_at,
        }
    }

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_sums_within_group() {
        let rows = vec![
            fill("T1", "buy", 1.0, 10.0, None),
            fill("T1", "buy", 2.0, 5.0, None),
        ];

        let trades = aggregate_fills(&rows);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].trade_id, "T1");
        assert_eq!(trades[0].seller_net_total, 3.0);
        assert_eq!(trades[0].buyer_net_total, 15.0);
    }

    #[test]
    fn test_one_trade_per_distinct_id() {
        let rows = vec![
            fill("T1", "buy", 0.0, 1.0, None),
            fill("T2", "sell", 2.0, 0.0, None),
            fill("T1", "buy", 0.0, 1.0, None),
            fill("T3", "buy", 0.0, 3.0, None),
        ];

        let trades = aggregate_fills(&rows);
        assert_eq!(trades.len(), 3);
    }

    #[test]
    fn test_first_appearance_order() {
        let rows = vec![
            fill("T9", "buy", 0.0, 1.0, None),
            fill("T2", "sell", 1.0, 0.0, None),
            fill("T9", "buy", 0.0, 1.0, None),
            fill("T5", "buy", 0.0, 1.0, None),
        ];

        let trades = aggregate_fills(&rows);
        let ids: Vec<&str> = trades.iter().map(|t| t.trade_id.as_str()).collect();
        assert_eq!(ids, vec!["T9", "T2", "T5"]);
    }

    #[test]
    fn test_first_side_wins_on_mixed_group() {
        let rows = vec![
            fill("T1", "sell", 1.0, 0.0, None),
            fill("T1", "buy", 0.0, 1.0, None),
        ];

        let trades = aggregate_fills(&rows);
        assert_eq!(trades[0].side, "sell");
    }

    #[test]
    fn test_earliest_time_skips_nulls() {
        let rows = vec![
            fill("T1", "buy", 0.0, 1.0, None),
            fill("T1", "buy", 0.0, 1.0, Some(ts(12))),
            fill("T1", "buy", 0.0, 1.0, Some(ts(9))),
        ];

        let trades = aggregate_fills(&rows);
        assert_eq!(trades[0].earliest_time, Some(ts(9)));
    }

    #[test]
    fn test_all_null_times_yield_none() {
        let rows = vec![
            fill("T1", "buy", 0.0, 1.0, None),
            fill("T1", "buy", 0.0, 1.0, None),
        ];

        let trades = aggregate_fills(&rows);
        assert!(trades[0].earliest_time.is_none());
    }
}
