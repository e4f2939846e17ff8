//! Table Error Types

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by table construction, IO and transforms
#[derive(Debug, Error)]
pub enum TableError {
    /// Source could not be read or is not delimited text
    #[error("Failed to load table from {source_name}: {reason}")]
    Load { source_name: String, reason: String },

    /// Expected column absent
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Column name already present
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Row or column length does not match the table shape
    #[error("Shape mismatch: expected {expected} cells, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Dataframe operation failed
    #[error("Dataframe error: {0}")]
    Frame(#[from] PolarsError),

    /// Writing failed
    #[error("Failed to write table: {0}")]
    Write(String),
}

impl From<std::io::Error> for TableError {
    fn from(err: std::io::Error) -> Self {
        TableError::Write(err.to_string())
    }
}
