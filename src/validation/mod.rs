//! Input schema validation.
//!
//! The Temple export must carry a fixed set of columns. Extra columns are
//! ignored and column order is irrelevant; lookup is by name only.

use crate::error::SchemaError;

/// Columns a Temple trade fills export must contain.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "trade_id",
    "symbol",
    "quantity",
    "price",
    "seller_fees",
    "buyer_fees",
    "seller_net",
    "buyer_net",
    "side",
    "created_at",
];

/// Verify that every required column is present in the header.
///
/// Returns a [`SchemaError`] naming the missing columns; the whole run
/// halts on failure, before any row processing.
pub fn check_required_columns(headers: &[String]) -> Result<(), SchemaError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_header() -> Vec<String> {
        REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_complete_header_passes() {
        assert!(check_required_columns(&full_header()).is_ok());
    }

    #[test]
    fn test_extra_columns_ignored() {
        let mut headers = full_header();
        headers.push("exchange".to_string());
        assert!(check_required_columns(&headers).is_ok());
    }

    #[test]
    fn test_missing_column_named() {
        let headers: Vec<String> = full_header()
            .into_iter()
            .filter(|h| h != "price")
            .collect();

        let err = check_required_columns(&headers).unwrap_err();
        assert_eq!(err.missing, vec!["price"]);
        assert_eq!(err.to_string(), "Missing required columns: price");
    }

    #[test]
    fn test_multiple_missing_columns_comma_joined() {
        let headers: Vec<String> = full_header()
            .into_iter()
            .filter(|h| h != "quantity" && h != "side")
            .collect();

        let err = check_required_columns(&headers).unwrap_err();
        assert_eq!(err.to_string(), "Missing required columns: quantity, side");
    }

    #[test]
    fn test_column_order_irrelevant() {
        let mut headers = full_header();
        headers.reverse();
        assert!(check_required_columns(&headers).is_ok());
    }
}
