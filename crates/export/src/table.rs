use core_types::{FiscalQuarter, OperationsRecord, PricePoint};
use serde::Serialize;

/// A row type with a fixed, ordered column layout.
///
/// `COLUMNS` must list the serialized fields in declaration order; the header
/// is written from it even when a table has no rows.
pub trait TableRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

impl TableRow for PricePoint {
    const COLUMNS: &'static [&'static str] = &["date", "open", "high", "low", "close", "volume"];
}

impl TableRow for FiscalQuarter {
    const COLUMNS: &'static [&'static str] = &["quarter_label", "revenue", "net_income", "eps"];
}

impl TableRow for OperationsRecord {
    const COLUMNS: &'static [&'static str] = &[
        "quarter_label",
        "model_a_production",
        "model_a_deliveries",
        "model_b_production",
        "model_b_deliveries",
    ];
}
