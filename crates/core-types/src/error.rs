use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Malformed quarter label '{0}': expected 'YYYYQn' or 'Qn-YYYY'")]
    MalformedQuarter(String),

    #[error("Quarter number must be between 1 and 4, got {0}")]
    QuarterOutOfRange(u32),

    #[error("Value {0} cannot be represented as a decimal")]
    NotRepresentable(f64),
}
