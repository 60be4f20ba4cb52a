use crate::error::OperationsError;
use configuration::{ModelFamily, OperationsParams};
use core_types::{FiscalQuarter, OperationsRecord, QuarterLabel};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::collections::BTreeMap;

/// Generates production and delivery counts correlated with revenue.
#[derive(Debug, Clone)]
pub struct OperationsSynthesizer {
    params: OperationsParams,
}

impl OperationsSynthesizer {
    pub fn new(params: OperationsParams) -> Result<Self, OperationsError> {
        if !(params.revenue_unit.is_finite() && params.revenue_unit > 0.0) {
            return Err(OperationsError::InvalidParameter(format!(
                "revenue_unit must be positive, got {}",
                params.revenue_unit
            )));
        }
        if !params.pivot_scale.is_finite() {
            return Err(OperationsError::InvalidParameter(
                "pivot_scale must be finite".to_string(),
            ));
        }
        validate_family("model_a", &params.model_a)?;
        validate_family("model_b", &params.model_b)?;
        Ok(Self { params })
    }

    /// Revenue expressed in `revenue_unit`s (billions by default).
    pub fn scale(&self, revenue: i64) -> f64 {
        revenue as f64 / self.params.revenue_unit
    }

    /// Noise-free value of a counter with the given baseline and sensitivity.
    ///
    /// Equals `baseline` exactly when `scale` sits on the pivot.
    pub fn expected_units(&self, baseline: i64, sensitivity: f64, scale: f64) -> f64 {
        baseline as f64 * (1.0 + sensitivity * (scale - self.params.pivot_scale))
    }

    /// One record per financial row, in the same order.
    ///
    /// The rows must form a gap-free, duplicate-free quarter sequence, which is
    /// exactly what the financial synthesizer emits.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        financials: &[FiscalQuarter],
        rng: &mut R,
    ) -> Result<Vec<OperationsRecord>, OperationsError> {
        for pair in financials.windows(2) {
            let (prev, next) = (pair[0].quarter_label, pair[1].quarter_label);
            if prev.succ() != next {
                return Err(OperationsError::Dependency(format!(
                    "quarter {next} does not directly follow {prev}"
                )));
            }
        }
        let quarters: Vec<QuarterLabel> = financials.iter().map(|row| row.quarter_label).collect();
        self.synthesize_for(&quarters, financials, rng)
    }

    /// One record per requested quarter, joined to `financials` by label.
    ///
    /// Every requested quarter must have exactly one financial row. All joins
    /// are resolved before any random draw, so a failed call consumes nothing
    /// from `rng`. Each quarter draws family A production, family A
    /// deliveries, family B production, then family B deliveries.
    #[tracing::instrument(name = "operations_synthesize", skip_all, fields(quarters = quarters.len()))]
    pub fn synthesize_for<R: Rng + ?Sized>(
        &self,
        quarters: &[QuarterLabel],
        financials: &[FiscalQuarter],
        rng: &mut R,
    ) -> Result<Vec<OperationsRecord>, OperationsError> {
        let mut by_label: BTreeMap<QuarterLabel, &FiscalQuarter> = BTreeMap::new();
        for row in financials {
            if by_label.insert(row.quarter_label, row).is_some() {
                return Err(OperationsError::Dependency(format!(
                    "duplicate financial record for {}",
                    row.quarter_label
                )));
            }
        }
        let joined: Vec<&FiscalQuarter> = quarters
            .iter()
            .map(|label| {
                by_label.get(label).copied().ok_or_else(|| {
                    OperationsError::Dependency(format!("no financial record for {label}"))
                })
            })
            .collect::<Result<_, _>>()?;

        let a = &self.params.model_a;
        let b = &self.params.model_b;
        let noise_a = normal(a.noise)?;
        let noise_b = normal(b.noise)?;

        let mut records = Vec::with_capacity(joined.len());
        for row in joined {
            let scale = self.scale(row.revenue);
            let mut counter = |baseline: i64, family: &ModelFamily, noise: &Normal<f64>| {
                let units = self.expected_units(baseline, family.sensitivity, scale)
                    * (1.0 + noise.sample(rng));
                units.max(0.0).trunc() as u64
            };
            let record = OperationsRecord {
                quarter_label: row.quarter_label,
                model_a_production: counter(a.production_baseline, a, &noise_a),
                model_a_deliveries: counter(a.deliveries_baseline, a, &noise_a),
                model_b_production: counter(b.production_baseline, b, &noise_b),
                model_b_deliveries: counter(b.deliveries_baseline, b, &noise_b),
            };
            tracing::debug!(quarter = %record.quarter_label, scale, ?record, "Operations derived");
            records.push(record);
        }

        tracing::info!(rows = records.len(), "Production and deliveries synthesized");
        Ok(records)
    }
}

fn validate_family(name: &str, family: &ModelFamily) -> Result<(), OperationsError> {
    if family.production_baseline < 0 || family.deliveries_baseline < 0 {
        return Err(OperationsError::InvalidParameter(format!(
            "{name} baselines must be non-negative"
        )));
    }
    if !family.sensitivity.is_finite() {
        return Err(OperationsError::InvalidParameter(format!(
            "{name}.sensitivity must be finite"
        )));
    }
    if !(family.noise.is_finite() && family.noise >= 0.0) {
        return Err(OperationsError::InvalidParameter(format!(
            "{name}.noise must be non-negative, got {}",
            family.noise
        )));
    }
    Ok(())
}

fn normal(std_dev: f64) -> Result<Normal<f64>, OperationsError> {
    Normal::new(0.0, std_dev)
        .map_err(|e| OperationsError::InvalidParameter(format!("Normal(0, {std_dev}): {e}")))
}
