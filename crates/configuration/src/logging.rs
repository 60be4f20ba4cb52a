use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `settings.level`. With `settings.directory` set, output
/// goes to a daily-rolling file through a non-blocking writer, and the returned
/// guard must be held until the process exits or buffered lines are lost.
pub fn init_logging(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level)
            .map_err(|e| ConfigError::Logging(format!("bad level '{}': {e}", settings.level)))?,
    };

    match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &settings.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| ConfigError::Logging(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| ConfigError::Logging(e.to_string()))?;
            Ok(None)
        }
    }
}
