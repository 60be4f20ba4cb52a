use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single fiscal quarter, e.g. `Q1-2018`.
///
/// Fields are ordered year-first so the derived `Ord` is chronological.
/// Accepts both the period form (`2018Q1`) and the label form (`Q1-2018`)
/// when parsing, and always displays in the label form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuarterLabel {
    year: i32,
    quarter: u32,
}

impl QuarterLabel {
    pub fn new(year: i32, quarter: u32) -> Result<Self, CoreError> {
        if !(1..=4).contains(&quarter) {
            return Err(CoreError::QuarterOutOfRange(quarter));
        }
        Ok(Self { year, quarter })
    }

    /// The quarter that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: date.month0() / 3 + 1,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn quarter(&self) -> u32 {
        self.quarter
    }

    /// The next quarter, rolling over into the following year after Q4.
    pub fn succ(&self) -> Self {
        if self.quarter == 4 {
            Self { year: self.year + 1, quarter: 1 }
        } else {
            Self { year: self.year, quarter: self.quarter + 1 }
        }
    }

    /// Fractional years elapsed since `origin`, in steps of 0.25.
    pub fn years_since(&self, origin: &QuarterLabel) -> f64 {
        f64::from(self.year - origin.year)
            + (f64::from(self.quarter) - f64::from(origin.quarter)) / 4.0
    }

    /// Whole calendar years elapsed since `origin`, ignoring the quarter.
    pub fn calendar_years_since(&self, origin: &QuarterLabel) -> i32 {
        self.year - origin.year
    }

    /// Every quarter from `start` through `end`, inclusive. Empty when `end < start`.
    pub fn range_inclusive(start: QuarterLabel, end: QuarterLabel) -> Vec<QuarterLabel> {
        let mut quarters = Vec::new();
        let mut current = start;
        while current <= end {
            quarters.push(current);
            current = current.succ();
        }
        quarters
    }
}

impl fmt::Display for QuarterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}-{}", self.quarter, self.year)
    }
}

impl FromStr for QuarterLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let malformed = || CoreError::MalformedQuarter(s.to_string());

        let (year, quarter) = if let Some(rest) = trimmed.strip_prefix(['Q', 'q']) {
            // Label form: Qn-YYYY
            let (quarter, year) = rest.split_once('-').ok_or_else(malformed)?;
            (year, quarter)
        } else {
            // Period form: YYYYQn
            trimmed.split_once(['Q', 'q']).ok_or_else(malformed)?
        };

        let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(year, 4) || !digits(quarter, 1) {
            return Err(malformed());
        }
        let year: i32 = year.parse().map_err(|_| malformed())?;
        let quarter: u32 = quarter.parse().map_err(|_| malformed())?;
        if year < 1000 {
            return Err(malformed());
        }
        QuarterLabel::new(year, quarter)
    }
}

impl TryFrom<String> for QuarterLabel {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QuarterLabel> for String {
    fn from(label: QuarterLabel) -> Self {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_forms() {
        let period: QuarterLabel = "2018Q1".parse().unwrap();
        let label: QuarterLabel = "Q1-2018".parse().unwrap();
        assert_eq!(period, label);
        assert_eq!(period.to_string(), "Q1-2018");
    }

    #[test]
    fn rejects_malformed_labels() {
        for bad in ["", "2018", "Q5-2018", "2018Q0", "Q1/2018", "18Q1", "QQ-2018", "0201Q1"] {
            assert!(bad.parse::<QuarterLabel>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_signed_components() {
        for bad in ["+2018Q1", "Q+1-2018", "Q1-+2018", "2018Q+1", "-2018Q1", "Q01-2018"] {
            assert!(
                matches!(bad.parse::<QuarterLabel>(), Err(CoreError::MalformedQuarter(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn containing_maps_months_to_quarters() {
        let q = |m| QuarterLabel::containing(NaiveDate::from_ymd_opt(2021, m, 15).unwrap());
        assert_eq!(q(1).quarter(), 1);
        assert_eq!(q(3).quarter(), 1);
        assert_eq!(q(4).quarter(), 2);
        assert_eq!(q(9).quarter(), 3);
        assert_eq!(q(12).quarter(), 4);
    }

    #[test]
    fn range_rolls_over_year_end() {
        let start = QuarterLabel::new(2018, 3).unwrap();
        let end = QuarterLabel::new(2019, 2).unwrap();
        let labels: Vec<String> = QuarterLabel::range_inclusive(start, end)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, ["Q3-2018", "Q4-2018", "Q1-2019", "Q2-2019"]);
        assert!(QuarterLabel::range_inclusive(end, start).is_empty());
    }

    #[test]
    fn years_since_steps_by_quarter() {
        let origin = QuarterLabel::new(2018, 1).unwrap();
        let later = QuarterLabel::new(2019, 3).unwrap();
        assert_eq!(later.years_since(&origin), 1.5);
        assert_eq!(later.calendar_years_since(&origin), 1);
    }

    #[test]
    fn serde_uses_label_form() {
        let label = QuarterLabel::new(2020, 4).unwrap();
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"Q4-2020\"");
        let back: QuarterLabel = serde_json::from_str("\"2020Q4\"").unwrap();
        assert_eq!(back, label);
    }
}
