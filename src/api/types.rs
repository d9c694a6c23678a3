//! REST API types for the upload endpoint.
//!
//! The response carries the converted CSV verbatim plus the display
//! metadata (summary counts, fee advisory, parse info) a client needs to
//! render a conversion summary.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::transform::pipeline::ConversionResult;

/// Response sent to the client after CSV upload and conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Unique job identifier
    pub job_id: String,

    /// Status: "ready", or "warning" when the fee advisory fired
    pub status: String,

    /// Suggested download filename
    pub filename: String,

    /// Converted Bitwave CSV text
    pub csv: String,

    /// Metadata about the conversion
    pub metadata: ResponseMetadata,
}

/// Metadata about the conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Fee advisory: non-zero fees seen, manual review needed
    pub fees_detected: bool,

    /// Conversion counts
    pub summary: SummaryStats,

    /// Input CSV info
    pub csv_info: CsvMetadata,
}

/// Conversion counts for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub input_fills: usize,
    pub unique_trades: usize,
    pub sell_trades: usize,
    pub buy_trades: usize,
    pub output_rows: usize,
}

/// Input CSV metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvMetadata {
    pub encoding: String,
    pub delimiter: String,
    pub row_count: usize,
    pub columns: Vec<String>,
}

impl From<ConversionResult> for UploadResponse {
    fn from(result: ConversionResult) -> Self {
        UploadResponse {
            job_id: Uuid::new_v4().to_string(),
            status: if result.fees_detected { "warning" } else { "ready" }.to_string(),
            filename: result.filename,
            csv: result.csv,
            metadata: ResponseMetadata {
                fees_detected: result.fees_detected,
                summary: SummaryStats {
                    input_fills: result.summary.input_rows,
                    unique_trades: result.summary.unique_trades,
                    sell_trades: result.summary.sell_trades,
                    buy_trades: result.summary.buy_trades,
                    output_rows: result.summary.output_rows,
                },
                csv_info: CsvMetadata {
                    encoding: result.csv_info.encoding,
                    delimiter: result.csv_info.delimiter.to_string(),
                    row_count: result.csv_info.row_count,
                    columns: result.csv_info.headers,
                },
            },
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "csv": "",
        "metadata": {
            "feesDetected": false
        }
    })
}
