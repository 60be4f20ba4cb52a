//! # Operations Synthesizer
//!
//! Derives quarterly production and delivery counts for two model families
//! from the revenue of the matching financial quarter. A family's counters
//! move with revenue in proportion to its sensitivity, plus independent noise.
//!
//! Depends on the output of the `financials` crate, joined by `QuarterLabel`.

pub mod error;
pub mod synthesizer;

pub use error::OperationsError;
pub use synthesizer::OperationsSynthesizer;
