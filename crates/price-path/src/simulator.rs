use crate::calendar::business_days;
use crate::error::PricePathError;
use chrono::NaiveDate;
use configuration::PricePathParams;
use core_types::{PricePoint, to_cents};
use rand::Rng;
use rand::distributions::{Uniform, WeightedIndex};
use rand_distr::{Distribution, Normal};

/// Return sign applied for each outcome of the jump indicator:
/// no jump, up-jump, down-jump.
const JUMP_SIGNS: [f64; 3] = [0.0, 1.0, -1.0];

/// Generates a daily OHLCV history from a geometric random walk with jumps.
///
/// The simulator owns no random state. Every call draws from the generator
/// handed to it, so a freshly seeded generator reproduces the same path.
#[derive(Debug, Clone)]
pub struct PricePathSimulator {
    params: PricePathParams,
}

impl PricePathSimulator {
    /// Creates a simulator after checking that every parameter is in range.
    pub fn new(params: PricePathParams) -> Result<Self, PricePathError> {
        validate(&params)?;
        Ok(Self { params })
    }

    /// Simulates one row per business day in `[start, end]`.
    ///
    /// Draws happen in whole-column blocks: all baseline returns, then jump
    /// indicators, jump sizes, open noise, high noise, low noise and finally
    /// volume noise. Changing that order changes every seeded dataset.
    #[tracing::instrument(name = "price_path_simulate", skip(self, rng))]
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        rng: &mut R,
    ) -> Result<Vec<PricePoint>, PricePathError> {
        if end < start {
            return Err(PricePathError::InvalidRange(format!(
                "end date {end} is before start date {start}"
            )));
        }
        let dates = business_days(start, end);
        if dates.is_empty() {
            return Err(PricePathError::InvalidRange(format!(
                "no business days between {start} and {end}"
            )));
        }
        let n = dates.len();
        let p = &self.params;
        let jumps = &p.jumps;

        let baseline = normal(p.drift, p.volatility)?;
        let indicator = WeightedIndex::<f64>::new([
            (1.0 - jumps.up_probability - jumps.down_probability).max(0.0),
            jumps.up_probability,
            jumps.down_probability,
        ])
        .map_err(|e| PricePathError::InvalidParameter(format!("jump probabilities: {e}")))?;
        let magnitude = Uniform::new(jumps.min_magnitude, jumps.max_magnitude);
        let open_noise = normal(0.0, p.open_noise)?;
        let range_noise = normal(p.range_noise_mean, p.range_noise_std)?;
        let volume_noise = normal(0.0, p.volume_noise)?;

        // --- 1. Daily log-returns ---
        let mut returns: Vec<f64> = draw(n, rng, &baseline);
        let signs: Vec<f64> = (0..n).map(|_| JUMP_SIGNS[indicator.sample(rng)]).collect();
        let sizes: Vec<f64> = draw(n, rng, &magnitude);
        for (i, ret) in returns.iter_mut().enumerate() {
            if signs[i] != 0.0 {
                tracing::debug!(date = %dates[i], size = signs[i] * sizes[i], "Jump day");
            }
            *ret += signs[i] * sizes[i];
        }

        // --- 2. Close path ---
        // The first day's return is drawn but unused so that the close path
        // starts exactly at `init_price`.
        let mut close = Vec::with_capacity(n);
        close.push(p.init_price);
        for i in 1..n {
            close.push(close[i - 1] * returns[i].exp());
        }

        // --- 3. Open, high, low from the same-day close ---
        let open: Vec<f64> = close
            .iter()
            .map(|c| c * (1.0 + open_noise.sample(rng)))
            .collect();
        let high: Vec<f64> = open
            .iter()
            .zip(&close)
            .map(|(o, c)| o.max(*c) * (1.0 + range_noise.sample(rng).abs()))
            .collect();
        let low: Vec<f64> = open
            .iter()
            .zip(&close)
            .map(|(o, c)| o.min(*c) * (1.0 - range_noise.sample(rng).abs()))
            .collect();

        // --- 4. Volume with a rising secular trend ---
        let trend = linspace(p.volume_trend_start, p.volume_trend_end, n);
        let volume: Vec<u64> = trend
            .iter()
            .map(|t| {
                let raw = p.base_volume * t * (1.0 + volume_noise.sample(rng));
                raw.max(0.0).trunc() as u64
            })
            .collect();

        // --- 5. Floor, round and emit ---
        let floor = p.price_floor;
        let emit = |value: f64| to_cents(value.max(floor));
        let mut points = Vec::with_capacity(n);
        for i in 0..n {
            points.push(PricePoint {
                date: dates[i],
                open: emit(open[i])?,
                high: emit(high[i])?,
                low: emit(low[i])?,
                close: emit(close[i])?,
                volume: volume[i],
            });
        }

        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            tracing::info!(
                rows = points.len(),
                first_close = %first.close,
                last_close = %last.close,
                "Price path simulated"
            );
        }
        Ok(points)
    }
}

fn validate(p: &PricePathParams) -> Result<(), PricePathError> {
    let invalid = |msg: String| -> Result<(), PricePathError> {
        Err(PricePathError::InvalidParameter(msg))
    };

    if !(p.init_price.is_finite() && p.init_price > 0.0) {
        return invalid(format!("init_price must be positive, got {}", p.init_price));
    }
    if !p.drift.is_finite() || !p.range_noise_mean.is_finite() {
        return invalid("drift and range_noise_mean must be finite".to_string());
    }
    let spreads = [
        ("volatility", p.volatility),
        ("open_noise", p.open_noise),
        ("range_noise_std", p.range_noise_std),
        ("volume_noise", p.volume_noise),
        ("base_volume", p.base_volume),
    ];
    for (name, value) in spreads {
        if !(value.is_finite() && value >= 0.0) {
            return invalid(format!("{name} must be non-negative, got {value}"));
        }
    }
    if !p.volume_trend_start.is_finite() || !p.volume_trend_end.is_finite() {
        return invalid("volume trend bounds must be finite".to_string());
    }
    if !(p.price_floor.is_finite() && p.price_floor > 0.0) {
        return invalid(format!("price_floor must be positive, got {}", p.price_floor));
    }

    let j = &p.jumps;
    for (name, prob) in [("up_probability", j.up_probability), ("down_probability", j.down_probability)] {
        if !(0.0..=1.0).contains(&prob) {
            return invalid(format!("jumps.{name} must be within [0, 1], got {prob}"));
        }
    }
    if j.up_probability + j.down_probability > 1.0 {
        return invalid("jump probabilities sum to more than 1".to_string());
    }
    if !(j.min_magnitude.is_finite() && j.max_magnitude.is_finite())
        || j.min_magnitude < 0.0
        || j.min_magnitude >= j.max_magnitude
    {
        return invalid(format!(
            "jump magnitudes must satisfy 0 <= min < max, got [{}, {})",
            j.min_magnitude, j.max_magnitude
        ));
    }
    Ok(())
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>, PricePathError> {
    Normal::new(mean, std_dev)
        .map_err(|e| PricePathError::InvalidParameter(format!("Normal({mean}, {std_dev}): {e}")))
}

fn draw<R, D>(n: usize, rng: &mut R, dist: &D) -> Vec<f64>
where
    R: Rng + ?Sized,
    D: Distribution<f64>,
{
    (0..n).map(|_| dist.sample(rng)).collect()
}

/// `n` evenly spaced values from `start` to `end`, both included exactly.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let span = end - start;
            let last = (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + span * i as f64 / last).collect();
            values[n - 1] = end;
            values
        }
    }
}
