use chrono::NaiveDate;
use core_types::QuarterLabel;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an empty `config.toml`
/// reproduces the reference dataset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub run: RunSettings,
    pub price_path: PricePathParams,
    pub financials: FinancialParams,
    pub operations: OperationsParams,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

/// The date range and seed shared by all three generators.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Seed for the single random source threaded through a run.
    pub seed: u64,
    /// First calendar day of the price history (inclusive).
    pub start_date: NaiveDate,
    /// Last calendar day of the price history (inclusive). Also fixes the
    /// final fiscal quarter.
    pub end_date: NaiveDate,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2018, 1, 1).expect("static date is valid"),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 8).expect("static date is valid"),
        }
    }
}

/// Parameters for the geometric random walk and the OHLCV derivation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricePathParams {
    /// Close price on the first calendar day.
    pub init_price: f64,
    /// Mean of the daily log-return.
    pub drift: f64,
    /// Standard deviation of the daily log-return.
    pub volatility: f64,
    pub jumps: JumpParams,
    /// Std-dev of the multiplicative noise turning the close into the open.
    pub open_noise: f64,
    /// Mean of the intraday range noise used for high and low.
    pub range_noise_mean: f64,
    /// Std-dev of the intraday range noise used for high and low.
    pub range_noise_std: f64,
    /// Shares traded on an average day before the trend multiplier.
    pub base_volume: f64,
    /// Volume trend multiplier on the first day.
    pub volume_trend_start: f64,
    /// Volume trend multiplier on the last day.
    pub volume_trend_end: f64,
    /// Std-dev of the multiplicative volume noise.
    pub volume_noise: f64,
    /// Lowest price any OHLC field may take.
    pub price_floor: f64,
}

impl Default for PricePathParams {
    fn default() -> Self {
        Self {
            init_price: 22.0,
            drift: 0.0009,
            volatility: 0.035,
            jumps: JumpParams::default(),
            open_noise: 0.002,
            range_noise_mean: 0.002,
            range_noise_std: 0.01,
            base_volume: 3_000_000.0,
            volume_trend_start: 0.8,
            volume_trend_end: 1.8,
            volume_noise: 0.3,
            price_floor: 0.01,
        }
    }
}

/// News-driven price jumps layered on top of the baseline return.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JumpParams {
    pub up_probability: f64,
    pub down_probability: f64,
    /// Smallest absolute log-return of a jump (inclusive).
    pub min_magnitude: f64,
    /// Largest absolute log-return of a jump (exclusive).
    pub max_magnitude: f64,
}

impl Default for JumpParams {
    fn default() -> Self {
        Self {
            up_probability: 0.01,
            down_probability: 0.01,
            min_magnitude: 0.03,
            max_magnitude: 0.25,
        }
    }
}

/// Parameters for the quarterly income statement model.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FinancialParams {
    /// First quarter emitted. Accepts `2018Q1` or `Q1-2018`.
    pub start_quarter: QuarterLabel,
    /// Expected revenue of the first quarter.
    pub base_revenue: f64,
    pub annual_growth_rate: f64,
    /// Slope of the denominator that tapers compounding growth.
    pub growth_damping: f64,
    pub revenue_noise: f64,
    /// Net margin in the first calendar year.
    pub margin_base: f64,
    /// Margin improvement per elapsed calendar year.
    pub margin_step: f64,
    pub margin_noise: f64,
    pub margin_floor: f64,
    pub margin_ceiling: f64,
    /// Constant share count used to derive EPS.
    pub share_count: u64,
}

impl Default for FinancialParams {
    fn default() -> Self {
        Self {
            start_quarter: QuarterLabel::new(2018, 1).expect("static quarter is valid"),
            base_revenue: 2e9,
            annual_growth_rate: 0.45,
            growth_damping: 0.02,
            revenue_noise: 0.08,
            margin_base: 0.02,
            margin_step: 0.005,
            margin_noise: 0.03,
            margin_floor: -0.20,
            margin_ceiling: 0.40,
            share_count: 1_000_000_000,
        }
    }
}

/// Parameters linking quarterly revenue to unit volumes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OperationsParams {
    /// Revenue divided by this gives the unitless `scale`.
    pub revenue_unit: f64,
    /// The `scale` at which every counter equals its baseline.
    pub pivot_scale: f64,
    /// The smaller, older model family.
    pub model_a: ModelFamily,
    /// The larger, newer model family.
    pub model_b: ModelFamily,
}

impl Default for OperationsParams {
    fn default() -> Self {
        Self {
            revenue_unit: 1e9,
            pivot_scale: 2.0,
            model_a: ModelFamily {
                production_baseline: 20_000,
                deliveries_baseline: 19_000,
                sensitivity: 0.12,
                noise: 0.12,
            },
            model_b: ModelFamily {
                production_baseline: 40_000,
                deliveries_baseline: 38_000,
                sensitivity: 0.35,
                noise: 0.15,
            },
        }
    }
}

/// Baseline volumes and revenue sensitivity of one model family.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelFamily {
    pub production_baseline: i64,
    pub deliveries_baseline: i64,
    pub sensitivity: f64,
    pub noise: f64,
}

/// Where the generated tables are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub prices_file: String,
    pub financials_file: String,
    pub operations_file: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            prices_file: "stock_prices.csv".to_string(),
            financials_file: "quarterly_financials.csv".to_string(),
            operations_file: "production_deliveries.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs go to a daily-rolling file here instead of stderr.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "synth.log".to_string(),
        }
    }
}

/// Command-line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct RunOverrides {
    /// Seed for the random source.
    #[cfg_attr(feature = "clap", arg(long))]
    pub seed: Option<u64>,
    /// First calendar day (format: YYYY-MM-DD).
    #[cfg_attr(feature = "clap", arg(long))]
    pub from: Option<NaiveDate>,
    /// Last calendar day (format: YYYY-MM-DD).
    #[cfg_attr(feature = "clap", arg(long))]
    pub to: Option<NaiveDate>,
    /// Directory the CSV files are written to.
    #[cfg_attr(feature = "clap", arg(long, short))]
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn apply_overrides(&mut self, overrides: &RunOverrides) {
        if let Some(seed) = overrides.seed {
            self.run.seed = seed;
        }
        if let Some(from) = overrides.from {
            self.run.start_date = from;
        }
        if let Some(to) = overrides.to {
            self.run.end_date = to;
        }
        if let Some(output) = &overrides.output {
            self.output.directory = output.clone();
        }
    }
}
