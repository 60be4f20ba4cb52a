use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing tables to disk.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
