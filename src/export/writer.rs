//! Writes flattened rows to a single-sheet CSV file through polars.

use crate::export::error::ExportError;
use crate::export::tabular::{ExportRow, NAME_COLUMN};
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::task;

pub const DEFAULT_FILE_NAME: &str = "previsao-tempo.csv";

/// `previsao-tempo.csv` in the user's download directory, or in the working
/// directory when there is none.
pub fn default_export_path() -> Result<PathBuf, ExportError> {
    let dir = match dirs::download_dir() {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(ExportError::NoOutputDirectory)?,
    };
    Ok(dir.join(DEFAULT_FILE_NAME))
}

/// Builds a frame with one string column per field; column order is that of
/// the first row.
pub fn rows_to_dataframe(rows: &[ExportRow]) -> Result<DataFrame, ExportError> {
    let field_names: Vec<&str> = rows
        .first()
        .map(|row| row.fields.iter().map(|(name, _)| name.as_str()).collect())
        .unwrap_or_default();

    let mut columns = Vec::with_capacity(field_names.len() + 1);
    let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    columns.push(Column::new(NAME_COLUMN.into(), names));

    for (index, field_name) in field_names.iter().enumerate() {
        let values: Vec<&str> = rows
            .iter()
            .map(|row| {
                row.fields
                    .get(index)
                    .map_or("", |(_, value)| value.as_str())
            })
            .collect();
        columns.push(Column::new((*field_name).into(), values));
    }

    DataFrame::new(columns).map_err(ExportError::DataFrame)
}

/// Writes `rows` to `path` as CSV with a header, on a blocking task.
pub async fn write_csv(rows: &[ExportRow], path: &Path) -> Result<(), ExportError> {
    let mut df = rows_to_dataframe(rows)?;
    let path_buf = path.to_path_buf();

    task::spawn_blocking(move || {
        let file = std::fs::File::create(&path_buf)
            .map_err(|e| ExportError::Io(path_buf.clone(), e))?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| ExportError::Csv(path_buf.clone(), e))?;
        info!("Wrote {} row(s) to {:?}", df.height(), path_buf);
        Ok::<(), ExportError>(())
    })
    .await??;
    Ok(())
}
