//! Build the two Bitwave ledger legs for each aggregated trade.
//!
//! Every trade becomes exactly one `tradeAcquire` and one `tradeDispose`
//! row. The two legs share a synthetic sequential `tradeId` (1-based,
//! incremented once per trade) which is independent of the source
//! `trade_id`; the source id travels in `blockchainId` instead.

use chrono::{DateTime, Datelike, Timelike, Utc};
use uuid::Uuid;

use crate::models::{AggregatedTrade, LedgerRow, Side, Ticker, TransactionType};

/// Round a monetary amount to 6 decimal places.
///
/// Applied exactly once per leg, here and nowhere else.
pub fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Render the destination time format `M/D/YY HH:MM` from a UTC instant,
/// or the empty string when no timestamp survived coercion.
///
/// Month and day are unpadded, the year keeps two digits, the 24-hour
/// clock is zero-padded. The format loses century information; the
/// destination schema wants it this way.
pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(t) => format!(
            "{}/{}/{:02} {:02}:{:02}",
            t.month(),
            t.day(),
            t.year() % 100,
            t.hour(),
            t.minute()
        ),
        None => String::new(),
    }
}

/// Emit acquire and dispose legs for every trade, in trade order.
///
/// The sequential counter is the fold state of this step: `enumerate`
/// over trades, shared by both legs of a trade.
pub fn build_legs(trades: &[AggregatedTrade]) -> Vec<LedgerRow> {
    let mut rows = Vec::with_capacity(trades.len() * 2);

    for (index, trade) in trades.iter().enumerate() {
        let trade_seq = index as u64 + 1;
        let side = Side::from_raw(&trade.side);
        let tickers = side.tickers();
        let time = format_time(trade.earliest_time);

        let (acquire_amount, dispose_amount) = match side {
            Side::Sell => (trade.seller_net_total, trade.buyer_net_total),
            Side::Buy => (trade.buyer_net_total, trade.seller_net_total),
        };

        rows.push(leg(
            TransactionType::TradeAcquire,
            round6(acquire_amount),
            tickers.acquire,
            &time,
            &trade.trade_id,
            trade_seq,
        ));
        rows.push(leg(
            TransactionType::TradeDispose,
            round6(dispose_amount),
            tickers.dispose,
            &time,
            &trade.trade_id,
            trade_seq,
        ));
    }

    rows
}

/// One output row; everything not listed is a blank placeholder the
/// destination schema requires.
fn leg(
    transaction_type: TransactionType,
    amount: f64,
    ticker: Ticker,
    time: &str,
    blockchain_id: &str,
    trade_seq: u64,
) -> LedgerRow {
    LedgerRow {
        id: Uuid::new_v4().simple().to_string(),
        remote_contact_id: String::new(),
        amount,
        amount_ticker: ticker,
        cost: String::new(),
        cost_ticker: String::new(),
        fee: String::new(),
        fee_ticker: String::new(),
        time: time.to_string(),
        blockchain_id: blockchain_id.to_string(),
        memo: String::new(),
        transaction_type,
        account_id: String::new(),
        contact_id: String::new(),
        category_id: String::new(),
        tax_exempt: "FALSE".to_string(),
        trade_id: trade_seq,
        description: String::new(),
        from_address: String::new(),
        to_address: String::new(),
        group_id: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn trade(
        trade_id: &str,
        side: &str,
        seller_net_total: f64,
        buyer_net_total: f64,
        earliest_time: Option<DateTime<Utc>>,
    ) -> AggregatedTrade {
        AggregatedTrade {
            trade_id: trade_id.to_string(),
            side: side.to_string(),
            seller_net_total,
            buyer_net_total,
            earliest_time,
        }
    }

    #[test]
    fn test_two_rows_per_trade() {
        let trades = vec![
            trade("T1", "buy", 0.0, 1.0, None),
            trade("T2", "sell", 2.0, 0.0, None),
        ];

        let rows = build_legs(&trades);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].transaction_type, TransactionType::TradeAcquire);
        assert_eq!(rows[1].transaction_type, TransactionType::TradeDispose);
    }

    #[test]
    fn test_trade_ids_dense_and_shared() {
        let trades = vec![
            trade("A", "buy", 0.0, 1.0, None),
            trade("B", "sell", 1.0, 0.0, None),
            trade("C", "buy", 0.0, 2.0, None),
        ];

        let rows = build_legs(&trades);
        let seqs: Vec<u64> = rows.iter().map(|r| r.trade_id).collect();
        assert_eq!(seqs, vec![1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_sell_mapping() {
        // Mixed case and trailing whitespace still counts as a sell
        let trades = vec![trade("T1", " Sell ", 100.0, 0.3, None)];

        let rows = build_legs(&trades);
        assert_eq!(rows[0].amount, 100.0);
        assert_eq!(rows[0].amount_ticker, Ticker::Usdc);
        assert_eq!(rows[1].amount, 0.3);
        assert_eq!(rows[1].amount_ticker, Ticker::Canton);
    }

    #[test]
    fn test_buy_mapping() {
        let trades = vec![trade("T1", "buy", 50.0, 10.0, None)];

        let rows = build_legs(&trades);
        assert_eq!(rows[0].amount, 10.0);
        assert_eq!(rows[0].amount_ticker, Ticker::Canton);
        assert_eq!(rows[1].amount, 50.0);
        assert_eq!(rows[1].amount_ticker, Ticker::Usdc);
    }

    #[test]
    fn test_unknown_side_treated_as_buy() {
        let trades = vec![trade("T1", "hold", 5.0, 7.0, None)];

        let rows = build_legs(&trades);
        assert_eq!(rows[0].amount_ticker, Ticker::Canton);
        assert_eq!(rows[0].amount, 7.0);
    }

    #[test]
    fn test_amount_rounded_to_six_decimals() {
        let trades = vec![trade("T1", "sell", 1.23456789, 0.0000004, None)];

        let rows = build_legs(&trades);
        assert_eq!(rows[0].amount, 1.234568);
        assert_eq!(rows[1].amount, 0.0);
    }

    #[test]
    fn test_blockchain_id_and_constants() {
        let trades = vec![trade("abc-123", "buy", 0.0, 1.0, None)];

        let rows = build_legs(&trades);
        for row in &rows {
            assert_eq!(row.blockchain_id, "abc-123");
            assert_eq!(row.tax_exempt, "FALSE");
            assert_eq!(row.memo, "");
            assert_eq!(row.group_id, "");
        }
    }

    #[test]
    fn test_row_ids_unique() {
        let trades = vec![
            trade("T1", "buy", 0.0, 1.0, None),
            trade("T2", "buy", 0.0, 1.0, None),
        ];

        let rows = build_legs(&trades);
        let ids: HashSet<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), rows.len());
        assert_eq!(rows[0].id.len(), 32);
    }

    #[test]
    fn test_format_time() {
        let t = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 59).unwrap();
        assert_eq!(format_time(Some(t)), "3/7/24 09:05");
        assert_eq!(format_time(None), "");
    }

    #[test]
    fn test_empty_time_when_no_timestamp() {
        let trades = vec![trade("T1", "buy", 0.0, 1.0, None)];

        let rows = build_legs(&trades);
        assert_eq!(rows[0].time, "");
        assert_eq!(rows[1].time, "");
    }

    #[test]
    fn test_round6() {
        assert_eq!(round6(1.0000006), 1.000001);
        assert_eq!(round6(15.0), 15.0);
        assert_eq!(round6(-2.3333333), -2.333333);
    }
}
