use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricePathError {
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid price path parameter: {0}")]
    InvalidParameter(String),

    #[error("Price could not be emitted: {0}")]
    Numeric(#[from] CoreError),
}
