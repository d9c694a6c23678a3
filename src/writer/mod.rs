//! Output CSV serialization and the download filename convention.

use chrono::{NaiveDate, Utc};

use crate::error::{CsvError, CsvResult};
use crate::models::LedgerRow;

/// Destination column names, in exact output order.
pub const OUTPUT_COLUMNS: [&str; 21] = [
    "id",
    "remoteContactId",
    "amount",
    "amountTicker",
    "cost",
    "costTicker",
    "fee",
    "feeTicker",
    "time",
    "blockchainId",
    "memo",
    "transactionType",
    "accountId",
    "contactId",
    "categoryId",
    "taxExempt",
    "tradeId",
    "description",
    "fromAddress",
    "toAddress",
    "groupId",
];

/// Render ledger rows as UTF-8 CSV text.
///
/// The header row is always written, even for an empty row set. Amounts
/// keep their shortest representation; no trailing zeros are forced
/// beyond the 6-decimal rounding already applied upstream.
pub fn to_csv(rows: &[LedgerRow]) -> CsvResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(OUTPUT_COLUMNS)
        .map_err(|e| CsvError::Parse(e.to_string()))?;

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| CsvError::Parse(e.to_string()))?;
    }

    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|e| CsvError::Parse(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| CsvError::Encoding(e.to_string()))
}

/// `bitwave_trades_<YYYY-MM-DD>.csv`, dated by conversion day, not by the
/// trades it contains.
pub fn output_filename(date: NaiveDate) -> String {
    format!("bitwave_trades_{}.csv", date.format("%Y-%m-%d"))
}

/// Filename for a conversion happening now (UTC).
pub fn default_output_filename() -> String {
    output_filename(Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ticker, TransactionType};

    fn row(amount: f64) -> LedgerRow {
        LedgerRow {
            id: "0123456789abcdef0123456789abcdef".to_string(),
            remote_contact_id: String::new(),
            amount,
            amount_ticker: Ticker::Usdc,
            cost: String::new(),
            cost_ticker: String::new(),
            fee: String::new(),
            fee_ticker: String::new(),
            time: "3/7/24 09:05".to_string(),
            blockchain_id: "T1".to_string(),
            memo: String::new(),
            transaction_type: TransactionType::TradeAcquire,
            account_id: String::new(),
            contact_id: String::new(),
            category_id: String::new(),
            tax_exempt: "FALSE".to_string(),
            trade_id: 1,
            description: String::new(),
            from_address: String::new(),
            to_address: String::new(),
            group_id: String::new(),
        }
    }

    #[test]
    fn test_header_exact() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(
            csv.lines().next().unwrap(),
            "id,remoteContactId,amount,amountTicker,cost,costTicker,fee,feeTicker,\
             time,blockchainId,memo,transactionType,accountId,contactId,categoryId,\
             taxExempt,tradeId,description,fromAddress,toAddress,groupId"
        );
    }

    #[test]
    fn test_header_written_for_empty_row_set() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_row_fields_rendered() {
        let csv = to_csv(&[row(0.3)]).unwrap();
        let line = csv.lines().nth(1).unwrap();
        let fields: Vec<&str> = line.split(',').collect();

        assert_eq!(fields.len(), 21);
        assert_eq!(fields[2], "0.3");
        assert_eq!(fields[3], "USDC");
        assert_eq!(fields[11], "tradeAcquire");
        assert_eq!(fields[15], "FALSE");
        assert_eq!(fields[16], "1");
    }

    #[test]
    fn test_output_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(output_filename(date), "bitwave_trades_2024-03-07.csv");
    }
}
