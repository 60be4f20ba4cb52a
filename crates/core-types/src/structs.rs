use crate::quarter::QuarterLabel;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day of the simulated equity.
///
/// Field order is the column order of the exported price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

impl PricePoint {
    /// Checks `low <= min(open, close) <= max(open, close) <= high`.
    pub fn is_consistent(&self) -> bool {
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        self.low <= body_low && body_high <= self.high
    }
}

/// Income statement headline figures for one fiscal quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalQuarter {
    pub quarter_label: QuarterLabel,
    pub revenue: i64,
    pub net_income: i64,
    pub eps: Decimal,
}

/// Production and delivery counts for the two model families in one quarter.
///
/// Keyed to its `FiscalQuarter` by `quarter_label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationsRecord {
    pub quarter_label: QuarterLabel,
    pub model_a_production: u64,
    pub model_a_deliveries: u64,
    pub model_b_production: u64,
    pub model_b_deliveries: u64,
}
