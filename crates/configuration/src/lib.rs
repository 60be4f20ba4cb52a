use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    Config, FinancialParams, JumpParams, LoggingSettings, ModelFamily, OperationsParams,
    OutputSettings, PricePathParams, RunOverrides, RunSettings,
};

/// Prefix of environment variables that override file settings,
/// e.g. `SYNTH__RUN__SEED=7`.
pub const ENV_PREFIX: &str = "SYNTH";

/// Loads the application configuration from `config.toml` in the working
/// directory, if present, layered under `SYNTH__*` environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    build(config::File::with_name("config.toml").required(false))
}

/// Loads the application configuration from an explicit file. Unlike
/// [`load_config`], a missing file is an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    build(config::File::from(path).required(true))
}

fn build<S>(file: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

impl Config {
    /// Cross-section checks that no single generator can make on its own.
    ///
    /// Per-model parameter checks stay with the generators so that the
    /// library entry points fail the same way whether or not they are
    /// driven from a config file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run.end_date < self.run.start_date {
            return Err(ConfigError::ValidationError(format!(
                "run.end_date ({}) is before run.start_date ({})",
                self.run.end_date, self.run.start_date
            )));
        }
        let files = [
            ("output.prices_file", &self.output.prices_file),
            ("output.financials_file", &self.output.financials_file),
            ("output.operations_file", &self.output.operations_file),
        ];
        for (key, name) in files {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_config("");
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.run.seed, 42);
        assert_eq!(config.price_path.init_price, 22.0);
        assert_eq!(config.financials.start_quarter.to_string(), "Q1-2018");
        assert_eq!(config.operations.model_b.production_baseline, 40_000);
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            [run]
            seed = 7
            start_date = "2020-01-01"
            end_date = "2020-12-31"

            [financials]
            start_quarter = "2020Q1"
            base_revenue = 5000000000

            [price_path.jumps]
            up_probability = 0.0
            "#,
        );
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.run.seed, 7);
        assert_eq!(config.run.start_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(config.financials.start_quarter.to_string(), "Q1-2020");
        assert_eq!(config.financials.base_revenue, 5e9);
        assert_eq!(config.price_path.jumps.up_probability, 0.0);
        // Untouched keys in a partially specified section keep their defaults.
        assert_eq!(config.price_path.jumps.down_probability, 0.01);
    }

    #[test]
    fn malformed_quarter_fails_to_load() {
        let file = write_config("[financials]\nstart_quarter = \"2018-Q9\"\n");
        assert!(matches!(
            load_config_from(file.path()),
            Err(ConfigError::LoadError(_))
        ));
    }

    #[test]
    fn reversed_dates_fail_validation() {
        let file = write_config("[run]\nstart_date = \"2021-01-01\"\nend_date = \"2020-01-01\"\n");
        assert!(matches!(
            load_config_from(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_from(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn overrides_replace_run_settings() {
        let mut config = Config::default();
        config.apply_overrides(&RunOverrides {
            seed: Some(99),
            from: None,
            to: NaiveDate::from_ymd_opt(2019, 6, 30),
            output: Some("fixtures".into()),
        });
        assert_eq!(config.run.seed, 99);
        assert_eq!(config.run.start_date, NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        assert_eq!(config.run.end_date, NaiveDate::from_ymd_opt(2019, 6, 30).unwrap());
        assert_eq!(config.output.directory, std::path::PathBuf::from("fixtures"));
    }
}
