use thiserror::Error;

#[derive(Error, Debug)]
pub enum OperationsError {
    #[error("Financial input does not come from the financial synthesizer: {0}")]
    Dependency(String),

    #[error("Invalid operations parameter: {0}")]
    InvalidParameter(String),
}
