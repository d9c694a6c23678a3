//! Advisory scan for unhandled fee activity.
//!
//! Fee handling is not implemented; any non-zero fee value only raises a
//! flag for manual review. The scan never alters output rows and never
//! fails the run.

use std::collections::HashMap;

use super::normalize::coerce_amount;

/// Totals of the two fee columns over the whole input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeScan {
    pub seller_fees_total: f64,
    pub buyer_fees_total: f64,
}

impl FeeScan {
    /// True when either fee column carries any net positive value.
    pub fn detected(&self) -> bool {
        self.seller_fees_total > 0.0 || self.buyer_fees_total > 0.0
    }
}

/// Sum both fee columns, treating non-numeric values as zero.
pub fn scan_fees(records: &[HashMap<String, String>]) -> FeeScan {
    let mut scan = FeeScan::default();

    for record in records {
        let field = |name: &str| record.get(name).map(String::as_str).unwrap_or("");
        scan.seller_fees_total += coerce_amount(field("seller_fees")).0;
        scan.buyer_fees_total += coerce_amount(field("buyer_fees")).0;
    }

    scan
}
