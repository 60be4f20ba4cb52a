use crate::error::ExportError;
use crate::table::TableRow;
use configuration::OutputSettings;
use core_types::Dataset;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Paths of the three tables written by [`write_dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub prices: PathBuf,
    pub financials: PathBuf,
    pub operations: PathBuf,
}

impl WrittenFiles {
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.prices, &self.financials, &self.operations]
            .into_iter()
            .map(PathBuf::as_path)
    }
}

/// Writes `rows` as a comma-delimited table with one header row.
pub fn write_table<W: io::Write, T: TableRow>(writer: W, rows: &[T]) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(T::COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Renders `rows` into the string cells that [`write_table`] would emit, one
/// record per row, header excluded.
pub fn to_records<T: TableRow>(rows: &[T]) -> Result<Vec<csv::StringRecord>, ExportError> {
    let mut buffer = Vec::new();
    write_table(&mut buffer, rows)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(buffer.as_slice());
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Creates (or truncates) `path` and writes the table into it.
pub fn write_table_file<T: TableRow>(path: &Path, rows: &[T]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_table(file, rows)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Table written");
    Ok(())
}

/// Writes all three tables into the configured output directory, creating it
/// if needed. Existing files with the same names are overwritten.
#[tracing::instrument(skip_all, fields(directory = %settings.directory.display()))]
pub fn write_dataset(settings: &OutputSettings, dataset: &Dataset) -> Result<WrittenFiles, ExportError> {
    fs::create_dir_all(&settings.directory).map_err(|source| ExportError::Io {
        path: settings.directory.clone(),
        source,
    })?;

    let files = WrittenFiles {
        prices: settings.directory.join(&settings.prices_file),
        financials: settings.directory.join(&settings.financials_file),
        operations: settings.directory.join(&settings.operations_file),
    };
    write_table_file(&files.prices, &dataset.prices)?;
    write_table_file(&files.financials, &dataset.financials)?;
    write_table_file(&files.operations, &dataset.operations)?;

    tracing::info!(
        prices = dataset.prices.len(),
        financials = dataset.financials.len(),
        operations = dataset.operations.len(),
        "Dataset exported"
    );
    Ok(files)
}
