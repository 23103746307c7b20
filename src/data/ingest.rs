//! JSON Ingestion Module
//! Converts an exported JSON record array into the loader's CSV shape.
//! Only keys prefixed `new_` carry scoring data; names are lowercased to
//! match the CSV convention.

use polars::prelude::*;
use serde_json::Value;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read JSON export: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed JSON export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JSON export root must be an array of records")]
    NotAnArray,
    #[error("Failed to build table: {0}")]
    Polars(#[from] PolarsError),
}

/// Attribute prefix marking scoring fields in the export.
const FIELD_PREFIX: &str = "new_";

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Read a JSON array of records, keep `new_`-prefixed keys, lowercase the
/// column names. Column order is first-seen order across records.
pub fn json_records_to_dataframe(path: &Path) -> Result<DataFrame, IngestError> {
    let file = File::open(path)?;
    let records: Value = serde_json::from_reader(file)?;
    let records = records.as_array().ok_or(IngestError::NotAnArray)?;

    let mut column_order: Vec<String> = Vec::new();
    for record in records {
        if let Some(map) = record.as_object() {
            for key in map.keys() {
                if key.starts_with(FIELD_PREFIX) {
                    let name = key.to_lowercase();
                    if !column_order.contains(&name) {
                        column_order.push(name);
                    }
                }
            }
        }
    }

    let columns: Vec<Column> = column_order
        .iter()
        .map(|name| {
            let cells: Vec<Option<String>> = records
                .iter()
                .map(|record| {
                    record
                        .as_object()
                        .and_then(|map| {
                            map.iter()
                                .find(|(key, _)| key.to_lowercase() == *name)
                                .map(|(_, value)| value)
                        })
                        .and_then(render_value)
                })
                .collect();
            Column::new(name.as_str().into(), cells)
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Write the converted table as the loader's CSV source.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), IngestError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn keeps_prefixed_keys_and_lowercases_names() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"new_Partner_Score": 80, "ignored": "x", "new_region": "EMEA"}},
                {{"new_partner_score": null, "new_region": "AMER"}}
            ]"#
        )
        .unwrap();
        file.flush().unwrap();

        let df = json_records_to_dataframe(file.path()).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["new_partner_score", "new_region"]);
        assert_eq!(df.height(), 2);

        let score = df.column("new_partner_score").unwrap();
        assert!(score.get(1).unwrap().is_null());
    }

    #[test]
    fn non_array_root_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"new_a": 1}}"#).unwrap();
        file.flush().unwrap();

        let err = json_records_to_dataframe(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::NotAnArray));
    }
}
