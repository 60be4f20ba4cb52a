use crate::quarter::QuarterLabel;
use crate::structs::{FiscalQuarter, OperationsRecord, PricePoint};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// The three tables produced by one run, fully materialized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub prices: Vec<PricePoint>,
    pub financials: Vec<FiscalQuarter>,
    pub operations: Vec<OperationsRecord>,
}

/// Headline figures of a dataset for logs and terminal output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub price_rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub first_close: Option<Decimal>,
    pub last_close: Option<Decimal>,
    pub quarter_rows: usize,
    pub first_quarter: Option<QuarterLabel>,
    pub last_quarter: Option<QuarterLabel>,
    pub operations_rows: usize,
}

impl Dataset {
    pub fn summary(&self) -> DatasetSummary {
        let first_price = self.prices.first();
        let last_price = self.prices.last();
        DatasetSummary {
            price_rows: self.prices.len(),
            first_date: first_price.map(|p| p.date),
            last_date: last_price.map(|p| p.date),
            first_close: first_price.map(|p| p.close),
            last_close: last_price.map(|p| p.close),
            quarter_rows: self.financials.len(),
            first_quarter: self.financials.first().map(|q| q.quarter_label),
            last_quarter: self.financials.last().map(|q| q.quarter_label),
            operations_rows: self.operations.len(),
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_dash<T: fmt::Display>(value: &Option<T>) -> String {
            value.as_ref().map_or_else(|| "-".to_string(), ToString::to_string)
        }
        writeln!(
            f,
            "prices:      {} rows, {} .. {}, close {} -> {}",
            self.price_rows,
            or_dash(&self.first_date),
            or_dash(&self.last_date),
            or_dash(&self.first_close),
            or_dash(&self.last_close),
        )?;
        writeln!(
            f,
            "financials:  {} rows, {} .. {}",
            self.quarter_rows,
            or_dash(&self.first_quarter),
            or_dash(&self.last_quarter),
        )?;
        write!(f, "operations:  {} rows", self.operations_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn summary_of_empty_dataset() {
        let summary = Dataset::default().summary();
        assert_eq!(summary.price_rows, 0);
        assert_eq!(summary.first_date, None);
        assert!(summary.to_string().contains("prices:      0 rows, - .. -"));
    }

    #[test]
    fn summary_reports_bounds() {
        let day = |d| NaiveDate::from_ymd_opt(2018, 1, d).unwrap();
        let point = |d, close| PricePoint {
            date: day(d),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1,
        };
        let dataset = Dataset {
            prices: vec![point(2, dec!(20.00)), point(3, dec!(21.50))],
            financials: vec![FiscalQuarter {
                quarter_label: QuarterLabel::new(2018, 1).unwrap(),
                revenue: 1,
                net_income: 0,
                eps: dec!(0.00),
            }],
            operations: Vec::new(),
        };
        let summary = dataset.summary();
        assert_eq!(summary.first_date, Some(day(2)));
        assert_eq!(summary.last_close, Some(dec!(21.50)));
        assert_eq!(summary.last_quarter.map(|q| q.to_string()).as_deref(), Some("Q1-2018"));
        assert!(summary.to_string().contains("close 20.00 -> 21.50"));
    }
}
