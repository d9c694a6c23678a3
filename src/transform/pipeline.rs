//! End-to-end conversion pipeline.
//!
//! Runs the stages strictly in order, one upload at a time, fully in
//! memory: parse → check columns → fee scan → normalize → aggregate →
//! build legs → serialize. Any fatal error stops the whole run before
//! output is produced; there is no partial-output mode.
//!
//! # Example
//!
//! ```rust,ignore
//! use temple2bitwave::convert_file;
//! use std::path::Path;
//!
//! let result = convert_file(Path::new("trades_export.csv"))?;
//! println!("{} trades → {} rows", result.summary.unique_trades, result.summary.output_rows);
//! std::fs::write(&result.filename, &result.csv)?;
//! ```

use std::path::Path;

use serde::Serialize;

use super::aggregate::aggregate_fills;
use super::fees::scan_fees;
use super::legs::build_legs;
use super::normalize::normalize_rows;
use crate::api::logs::{log_info, log_success, log_warning};
use crate::error::PipelineResult;
use crate::parser::{parse_bytes_auto, parse_csv_file_auto, ParseResult};
use crate::validation::check_required_columns;
use crate::writer::{default_output_filename, to_csv};

/// CSV parsing metadata, surfaced for display.
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Conversion counts, surfaced for display. `output_rows` is always
/// exactly `2 × unique_trades`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub input_rows: usize,
    pub unique_trades: usize,
    pub sell_trades: usize,
    pub buy_trades: usize,
    pub output_rows: usize,
}

/// Result of a complete conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    /// Converted Bitwave CSV text.
    pub csv: String,
    /// Suggested download filename (conversion-dated).
    pub filename: String,
    /// Fee advisory: non-zero fee values were seen; review manually.
    pub fees_detected: bool,
    pub summary: Summary,
    pub csv_info: CsvInfo,
}

/// Convert a Temple trade fills CSV file to Bitwave format.
pub fn convert_file(path: &Path) -> PipelineResult<ConversionResult> {
    let parse_result = parse_csv_file_auto(path)?;
    convert_parsed(parse_result)
}

/// Convert Temple trade fills CSV bytes to Bitwave format.
pub fn convert_bytes(bytes: &[u8]) -> PipelineResult<ConversionResult> {
    let parse_result = parse_bytes_auto(bytes)?;
    convert_parsed(parse_result)
}

fn convert_parsed(parse_result: ParseResult) -> PipelineResult<ConversionResult> {
    log_info("Reading CSV...");
    log_success(format!("Detected encoding: {}", parse_result.encoding));
    log_success(format!(
        "Detected delimiter: '{}'",
        format_delimiter(parse_result.delimiter)
    ));
    log_success(format!("Read {} fills", parse_result.records.len()));

    check_required_columns(&parse_result.headers)?;

    let fee_scan = scan_fees(&parse_result.records);
    if fee_scan.detected() {
        log_warning(
            "Fees detected: fee handling is not implemented, review these transactions manually",
        );
    }

    let fills = normalize_rows(&parse_result.records);
    let trades = aggregate_fills(&fills);
    log_success(format!("{} unique trades", trades.len()));

    let rows = build_legs(&trades);
    let csv = to_csv(&rows)?;
    log_success(format!("Generated {} output rows", rows.len()));

    // Sells/buys are counted on the exact normalized literals; anything
    // else counts toward neither, matching the source platform's summary.
    let sell_trades = trades
        .iter()
        .filter(|t| t.side.trim().to_lowercase() == "sell")
        .count();
    let buy_trades = trades
        .iter()
        .filter(|t| t.side.trim().to_lowercase() == "buy")
        .count();

    Ok(ConversionResult {
        csv,
        filename: default_output_filename(),
        fees_detected: fee_scan.detected(),
        summary: Summary {
            input_rows: parse_result.records.len(),
            unique_trades: trades.len(),
            sell_trades,
            buy_trades,
            output_rows: rows.len(),
        },
        csv_info: CsvInfo {
            encoding: parse_result.encoding,
            delimiter: parse_result.delimiter,
            headers: parse_result.headers,
            row_count: parse_result.records.len(),
        },
    })
}

/// Format delimiter for display
fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
