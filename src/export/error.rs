use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed building the export table")]
    DataFrame(#[source] PolarsError),

    #[error("Failed to write export file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode export file '{0}'")]
    Csv(PathBuf, #[source] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Could not determine a directory to write the export to")]
    NoOutputDirectory(#[source] std::io::Error),
}
