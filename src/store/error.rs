use crate::cleaning::error::CleaningError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("'{value}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("Column '{column}' expects a number, got '{value}'")]
    InvalidNumber { column: String, value: String },

    #[error("'{value}' is not a valid row position")]
    InvalidPosition { value: String },

    #[error("Failed to prepare weather table")]
    Preparation(#[from] CleaningError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
