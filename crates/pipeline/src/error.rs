use financials::FinancialsError;
use operations::OperationsError;
use price_path::PricePathError;
use thiserror::Error;

/// Any failure of a generation run. No partial dataset is returned.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Price path generation failed: {0}")]
    PricePath(#[from] PricePathError),

    #[error("Financial synthesis failed: {0}")]
    Financials(#[from] FinancialsError),

    #[error("Operations synthesis failed: {0}")]
    Operations(#[from] OperationsError),
}
