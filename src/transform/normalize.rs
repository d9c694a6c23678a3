//! Numeric and timestamp coercion with an explicit defaulting policy.
//!
//! Coercion failures are policy, not errors: amounts default to zero,
//! timestamps to `None`, and processing continues. Both coercions are
//! total functions so the defaulting stays testable in isolation.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::FillRow;

/// Zoneless timestamp shapes accepted from the export; UTC is attached.
const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a raw amount. Returns the value and whether the zero default
/// was applied.
///
/// Non-numeric, empty and non-finite inputs all coerce to `0.0`.
pub fn coerce_amount(raw: &str) -> (f64, bool) {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => (value, false),
        _ => (0.0, true),
    }
}

/// Parse a raw timestamp into a UTC instant.
///
/// Zoned inputs are converted to UTC; zoneless inputs are interpreted as
/// already being UTC. Anything unparsable yields `None`.
pub fn coerce_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f %z") {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

/// Convert raw header-keyed records into typed fills.
///
/// Assumes the header already passed
/// [`crate::validation::check_required_columns`]; absent values still
/// coerce to their defaults rather than panic.
pub fn normalize_rows(records: &[HashMap<String, String>]) -> Vec<FillRow> {
    records
        .iter()
        .map(|record| {
            let field = |name: &str| record.get(name).map(String::as_str).unwrap_or("");

            FillRow {
                trade_id: field("trade_id").to_string(),
                side: field("side").to_string(),
                seller_net: coerce_amount(field("seller_net")).0,
                buyer_net: coerce_amount(field("buyer_net")).0,
                created_at: coerce_timestamp(field("created_at")),
            }
        })
        .collect()
}
