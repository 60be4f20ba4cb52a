//! Writes generated tables as comma-delimited files with a single header row.
//!
//! Column order is fixed per row type by [`TableRow::COLUMNS`]; prices and EPS
//! keep exactly two fractional digits.

pub mod error;
pub mod table;
pub mod writer;

pub use error::ExportError;
pub use table::TableRow;
pub use writer::{WrittenFiles, to_records, write_dataset, write_table, write_table_file};
