use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleaningError {
    #[error("Required column 'date' not found in the raw table")]
    MissingDateColumn,

    #[error("Column names collide after normalization: '{name}'")]
    DuplicateColumn { name: String },

    #[error("Failed to rename columns")]
    ColumnRename(#[source] PolarsError),

    #[error("Failed to parse the date column")]
    DateParsing(#[source] PolarsError),

    #[error("Failed to fill missing values in column '{column}'")]
    Fill {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
