//! CSV Dataset Loader Module
//! Reads the merged partner dataset into a DataFrame using Polars.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("Dataset file not found: {0}")]
    NotFound(String),
    #[error("Failed to read dataset: {0}")]
    CsvError(#[from] PolarsError),
}

/// Load a delimited source with a header row. Column types are inferred,
/// missing cells become nulls.
pub fn load_csv(path: &Path) -> Result<DataFrame, DataSourceError> {
    if !path.is_file() {
        return Err(DataSourceError::NotFound(path.display().to_string()));
    }

    // Lazy scan for memory efficiency, then collect
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .finish()?
        .collect()?;

    Ok(df)
}
