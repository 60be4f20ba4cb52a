//! Shared domain types for the fixture generator.
//!
//! Every generator crate depends on this one and nothing else in the workspace
//! besides `configuration`. Types here carry no behavior beyond parsing and
//! invariant checks.

pub mod dataset;
pub mod error;
pub mod numeric;
pub mod quarter;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use dataset::{Dataset, DatasetSummary};
pub use error::CoreError;
pub use numeric::to_cents;
pub use quarter::QuarterLabel;
pub use structs::{FiscalQuarter, OperationsRecord, PricePoint};
