//! # temple2bitwave - Temple trade fills to Bitwave CSV conversion
//!
//! Converts a trade fills export from the Temple platform into a
//! Bitwave-compatible CSV, turning every logical trade (all fills sharing
//! a `trade_id`) into an acquire leg and a dispose leg.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌────────────┐    ┌────────────┐    ┌─────────────┐
//! │ Temple CSV  │───▶│  Parser +  │───▶│ Aggregate  │───▶│ Bitwave CSV │
//! │  (fills)    │    │  Validate  │    │  + Legs    │    │ (2/trade)   │
//! └─────────────┘    └────────────┘    └────────────┘    └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use temple2bitwave::convert_file;
//! use std::path::Path;
//!
//! let result = convert_file(Path::new("trades_export.csv"))?;
//! std::fs::write(&result.filename, &result.csv)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Domain models (FillRow, Side, AggregatedTrade, LedgerRow)
//! - [`parser`] - CSV parsing with auto-detection
//! - [`validation`] - Required-column check
//! - [`transform`] - Fee scan, normalization, aggregation, legs, pipeline
//! - [`writer`] - Output serialization and filename convention
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Output
pub mod writer;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, CsvResult, PipelineError, SchemaError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AggregatedTrade, FillRow, LedgerRow, LegTickers, Side, Ticker, TransactionType,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes_auto, parse_csv_file_auto,
    parse_records, ParseResult,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{check_required_columns, REQUIRED_COLUMNS};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    aggregate_fills, build_legs, normalize_rows, scan_fees, FeeScan,
};
pub use transform::normalize::{coerce_amount, coerce_timestamp};
pub use transform::pipeline::{
    convert_bytes, convert_file, ConversionResult, CsvInfo, Summary,
};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use writer::{default_output_filename, output_filename, to_csv, OUTPUT_COLUMNS};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, CsvMetadata, ResponseMetadata, SummaryStats, UploadResponse};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
