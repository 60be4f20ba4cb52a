use crate::error::FinancialsError;
use chrono::NaiveDate;
use configuration::FinancialParams;
use core_types::{FiscalQuarter, QuarterLabel, to_cents};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Generates quarterly revenue, net income and EPS.
#[derive(Debug, Clone)]
pub struct FinancialSynthesizer {
    params: FinancialParams,
}

impl FinancialSynthesizer {
    pub fn new(params: FinancialParams) -> Result<Self, FinancialsError> {
        validate(&params)?;
        Ok(Self { params })
    }

    /// Growth multiplier at `t` fractional years after the first quarter.
    ///
    /// Compounds at the annual rate, divided by a linear damping term so the
    /// effective rate decays over time.
    pub fn growth_factor(&self, t: f64) -> f64 {
        (1.0 + self.params.annual_growth_rate).powf(t) / (1.0 + self.params.growth_damping * t)
    }

    /// One row per quarter from the configured start quarter through the
    /// quarter containing `end_date`, inclusive.
    ///
    /// Each quarter draws its revenue noise, then its margin noise.
    #[tracing::instrument(name = "financials_synthesize", skip(self, rng))]
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        end_date: NaiveDate,
        rng: &mut R,
    ) -> Result<Vec<FiscalQuarter>, FinancialsError> {
        let p = &self.params;
        let start = p.start_quarter;
        let end = QuarterLabel::containing(end_date);
        if end < start {
            return Err(FinancialsError::InvalidRange(format!(
                "end date {end_date} falls in {end}, before start quarter {start}"
            )));
        }

        let revenue_noise = normal(0.0, p.revenue_noise)?;
        let margin_noise = normal(0.0, p.margin_noise)?;
        let shares = p.share_count as f64;

        let mut rows = Vec::new();
        for quarter in QuarterLabel::range_inclusive(start, end) {
            let t = quarter.years_since(&start);
            let revenue = p.base_revenue * self.growth_factor(t) * (1.0 + revenue_noise.sample(rng));

            let margin_base = p.margin_base + p.margin_step * f64::from(quarter.calendar_years_since(&start));
            let margin = (margin_base + margin_noise.sample(rng)).clamp(p.margin_floor, p.margin_ceiling);
            let net_income = (revenue * margin).round_ties_even() as i64;

            if revenue <= 0.0 {
                tracing::warn!(%quarter, revenue, "Non-positive revenue generated");
            }
            tracing::debug!(%quarter, t, revenue, margin, "Quarter synthesized");

            rows.push(FiscalQuarter {
                quarter_label: quarter,
                revenue: revenue.round_ties_even() as i64,
                net_income,
                eps: to_cents(net_income as f64 / shares)?,
            });
        }

        tracing::info!(rows = rows.len(), first = %start, last = %end, "Quarterly financials synthesized");
        Ok(rows)
    }
}

fn validate(p: &FinancialParams) -> Result<(), FinancialsError> {
    let invalid = |msg: String| -> Result<(), FinancialsError> {
        Err(FinancialsError::InvalidParameter(msg))
    };

    if !(p.base_revenue.is_finite() && p.base_revenue > 0.0) {
        return invalid(format!("base_revenue must be positive, got {}", p.base_revenue));
    }
    if p.share_count == 0 {
        return invalid("share_count must be positive".to_string());
    }
    if !(p.annual_growth_rate.is_finite() && p.annual_growth_rate > -1.0) {
        return invalid(format!(
            "annual_growth_rate must be greater than -1, got {}",
            p.annual_growth_rate
        ));
    }
    if !(p.growth_damping.is_finite() && p.growth_damping >= 0.0) {
        return invalid(format!("growth_damping must be non-negative, got {}", p.growth_damping));
    }
    for (name, value) in [("revenue_noise", p.revenue_noise), ("margin_noise", p.margin_noise)] {
        if !(value.is_finite() && value >= 0.0) {
            return invalid(format!("{name} must be non-negative, got {value}"));
        }
    }
    if !p.margin_base.is_finite() || !p.margin_step.is_finite() {
        return invalid("margin_base and margin_step must be finite".to_string());
    }
    if !(p.margin_floor.is_finite() && p.margin_ceiling.is_finite() && p.margin_floor <= p.margin_ceiling) {
        return invalid(format!(
            "margin bounds must satisfy floor <= ceiling, got [{}, {}]",
            p.margin_floor, p.margin_ceiling
        ));
    }
    Ok(())
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>, FinancialsError> {
    Normal::new(mean, std_dev)
        .map_err(|e| FinancialsError::InvalidParameter(format!("Normal({mean}, {std_dev}): {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run(params: FinancialParams, seed: u64, end: NaiveDate) -> Vec<FiscalQuarter> {
        let synthesizer = FinancialSynthesizer::new(params).unwrap();
        synthesizer.synthesize(end, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    fn noiseless() -> FinancialParams {
        FinancialParams {
            revenue_noise: 0.0,
            margin_noise: 0.0,
            ..FinancialParams::default()
        }
    }

    #[test]
    fn first_quarter_only() {
        let params = FinancialParams {
            start_quarter: "2018Q1".parse().unwrap(),
            ..FinancialParams::default()
        };
        let synthesizer = FinancialSynthesizer::new(params).unwrap();
        let rows = synthesizer
            .synthesize(date(2018, 3, 31), &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quarter_label.to_string(), "Q1-2018");
    }

    #[test]
    fn covers_through_quarter_containing_end_date() {
        let rows = run(FinancialParams::default(), 42, date(2025, 8, 8));
        assert_eq!(rows.len(), 31);
        assert_eq!(rows.first().unwrap().quarter_label.to_string(), "Q1-2018");
        assert_eq!(rows.last().unwrap().quarter_label.to_string(), "Q3-2025");
        for pair in rows.windows(2) {
            assert_eq!(pair[0].quarter_label.succ(), pair[1].quarter_label);
        }
    }

    #[test]
    fn same_seed_reproduces_rows() {
        let a = run(FinancialParams::default(), 9, date(2024, 12, 31));
        let b = run(FinancialParams::default(), 9, date(2024, 12, 31));
        assert_eq!(a, b);
    }

    #[test]
    fn noiseless_revenue_follows_tapered_growth() {
        let rows = run(noiseless(), 0, date(2019, 3, 31));
        let synthesizer = FinancialSynthesizer::new(noiseless()).unwrap();
        assert_eq!(rows[0].revenue, 2_000_000_000);
        let expected = (2e9 * synthesizer.growth_factor(1.0)).round_ties_even() as i64;
        assert_eq!(rows[4].revenue, expected);
        assert!((synthesizer.growth_factor(1.0) - 1.45 / 1.02).abs() < 1e-12);
        // Tapering keeps the growth factor strictly below plain compounding.
        assert!(synthesizer.growth_factor(5.0) < 1.45_f64.powf(5.0));
    }

    #[test]
    fn noiseless_margin_steps_each_calendar_year() {
        let rows = run(noiseless(), 0, date(2019, 12, 31));
        // 2% margin throughout 2018, 2.5% throughout 2019.
        assert_eq!(rows[0].net_income, 40_000_000);
        let q1_2019 = &rows[4];
        let ratio = q1_2019.net_income as f64 / q1_2019.revenue as f64;
        assert!((ratio - 0.025).abs() < 1e-6, "margin {ratio}");
    }

    #[test]
    fn eps_is_net_income_per_share() {
        let rows = run(noiseless(), 0, date(2018, 3, 31));
        assert_eq!(rows[0].eps, dec!(0.04));
        for row in run(FinancialParams::default(), 3, date(2025, 6, 30)) {
            assert_eq!(row.eps, to_cents(row.net_income as f64 / 1e9).unwrap());
        }
    }

    #[test]
    fn margin_is_clamped() {
        let params = FinancialParams {
            margin_noise: 5.0,
            ..FinancialParams::default()
        };
        let rows = run(params, 17, date(2025, 6, 30));
        let mut hit_floor = false;
        let mut hit_ceiling = false;
        for row in rows {
            let margin = row.net_income as f64 / row.revenue as f64;
            assert!((-0.2 - 1e-6..=0.4 + 1e-6).contains(&margin), "margin {margin}");
            hit_floor |= (margin + 0.2).abs() < 1e-6;
            hit_ceiling |= (margin - 0.4).abs() < 1e-6;
        }
        assert!(hit_floor && hit_ceiling);
    }

    #[test]
    fn non_positive_revenue_is_not_an_error() {
        let params = FinancialParams {
            revenue_noise: 3.0,
            ..FinancialParams::default()
        };
        let rows = run(params, 1, date(2025, 6, 30));
        assert!(rows.iter().any(|row| row.revenue <= 0));
    }

    #[test]
    fn end_before_start_quarter_is_rejected() {
        let synthesizer = FinancialSynthesizer::new(FinancialParams::default()).unwrap();
        let result = synthesizer.synthesize(date(2017, 12, 31), &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(FinancialsError::InvalidRange(_))));
    }

    #[test]
    fn bad_parameters_are_rejected() {
        let cases = [
            FinancialParams { base_revenue: 0.0, ..FinancialParams::default() },
            FinancialParams { share_count: 0, ..FinancialParams::default() },
            FinancialParams { annual_growth_rate: -1.0, ..FinancialParams::default() },
            FinancialParams { margin_floor: 0.5, ..FinancialParams::default() },
            FinancialParams { revenue_noise: -0.1, ..FinancialParams::default() },
            FinancialParams { margin_noise: -0.03, ..FinancialParams::default() },
            FinancialParams { margin_noise: f64::NAN, ..FinancialParams::default() },
        ];
        for params in cases {
            let result = FinancialSynthesizer::new(params.clone())
                .and_then(|s| s.synthesize(date(2018, 12, 31), &mut StdRng::seed_from_u64(0)));
            assert!(
                matches!(result, Err(FinancialsError::InvalidParameter(_))),
                "accepted {params:?}"
            );
        }
    }
}
