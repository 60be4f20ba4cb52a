use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinancialsError {
    #[error("Invalid quarter range: {0}")]
    InvalidRange(String),

    #[error("Invalid financial parameter: {0}")]
    InvalidParameter(String),

    #[error("EPS could not be emitted: {0}")]
    Numeric(#[from] CoreError),
}
