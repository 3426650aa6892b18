use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to create weather file '{0}'")]
    Create(PathBuf, #[source] std::io::Error),

    #[error("Failed to write weather table to '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Failed to read weather table from '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),
}
