//! Error types for the conversion pipeline.
//!
//! - [`CsvError`] - input is not readable/valid CSV
//! - [`SchemaError`] - required columns missing from the input header
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Row-level coercion failures (non-numeric amounts, unparsable
//! timestamps) are deliberately *not* errors: they default to zero / `None`
//! in [`crate::transform::normalize`] and processing continues. The fee
//! advisory is likewise not an error.

use thiserror::Error;

/// Errors while reading or parsing the input CSV. Fatal: nothing
/// downstream of the parser runs.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode input bytes.
    #[error("Failed to decode input: {0}")]
    Encoding(String),

    /// Invalid CSV format (malformed quoting, ragged rows, ...).
    #[error("Invalid CSV format: {0}")]
    Parse(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,
}

/// One or more required columns are missing from the input header.
/// Fatal: raised before any row processing, no output is produced.
#[derive(Debug, Error)]
#[error("Missing required columns: {}", .missing.join(", "))]
pub struct SchemaError {
    /// Names of the absent columns, in required-column order.
    pub missing: Vec<String>,
}

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::convert_bytes`]
/// and [`crate::transform::pipeline::convert_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV read/parse error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Input header failed validation.
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// IO error on the output sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_joins_missing_columns() {
        let err = SchemaError {
            missing: vec!["price".to_string(), "side".to_string()],
        };
        assert_eq!(err.to_string(), "Missing required columns: price, side");
    }

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> PipelineError
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        // SchemaError -> PipelineError
        let schema_err = SchemaError { missing: vec!["trade_id".to_string()] };
        let pipeline_err: PipelineError = schema_err.into();
        assert!(pipeline_err.to_string().contains("trade_id"));
    }
}
