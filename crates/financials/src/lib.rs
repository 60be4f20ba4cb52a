//! # Financial-Statement Synthesizer
//!
//! Produces one income-statement row per fiscal quarter: revenue on a tapered
//! compounding growth curve, a slowly improving net margin, and EPS over a
//! fixed share count.
//!
//! Pure logic; randomness comes from the caller.

pub mod error;
pub mod synthesizer;

pub use error::FinancialsError;
pub use synthesizer::FinancialSynthesizer;
