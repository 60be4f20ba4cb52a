//! Orchestrates one generation run.
//!
//! A run seeds a single random source and hands it, in order, to the price
//! path simulator, the financial synthesizer and the operations synthesizer.
//! The operations table is derived from the financial rows of the same run.

pub mod error;
pub mod run;

pub use error::PipelineError;
pub use run::{generate_dataset, generate_dataset_with};
