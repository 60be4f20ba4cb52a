use chrono::{Datelike, NaiveDate, Weekday};

/// Every Monday-to-Friday date in `[start, end]`, in order.
///
/// Holidays are not modeled. Empty when `end < start`.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn skips_weekends() {
        // 2018-01-05 is a Friday, 2018-01-08 the following Monday.
        let days = business_days(date(2018, 1, 5), date(2018, 1, 8));
        assert_eq!(days, vec![date(2018, 1, 5), date(2018, 1, 8)]);
    }

    #[test]
    fn first_week_of_2018_has_five_days() {
        let days = business_days(date(2018, 1, 1), date(2018, 1, 5));
        assert_eq!(days.len(), 5);
        assert_eq!(days.first(), Some(&date(2018, 1, 1)));
        assert_eq!(days.last(), Some(&date(2018, 1, 5)));
    }

    #[test]
    fn weekend_only_range_is_empty() {
        assert!(business_days(date(2018, 1, 6), date(2018, 1, 7)).is_empty());
    }

    #[test]
    fn reversed_range_is_empty() {
        assert!(business_days(date(2018, 1, 10), date(2018, 1, 1)).is_empty());
    }

    #[test]
    fn gaps_never_exceed_a_weekend() {
        let days = business_days(date(2018, 1, 1), date(2019, 12, 31));
        for pair in days.windows(2) {
            let gap = (pair[1] - pair[0]).num_days();
            assert!((1..=3).contains(&gap), "gap of {gap} days after {}", pair[0]);
        }
    }
}
