//! Preprocessing Error Types

use eeg_table::TableError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors during EEG preprocessing
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// Source file missing, unreadable or malformed
    #[error("Load error: {0}")]
    Load(String),

    /// Timestamp or numeric cell does not match the expected format
    #[error("Parse error: {0}")]
    Parse(String),

    /// Expected column absent from input
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Filesystem error while scanning directories
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other table failure
    #[error("Table error: {0}")]
    Table(TableError),
}

impl From<TableError> for PreprocessError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::Load { .. } => PreprocessError::Load(err.to_string()),
            TableError::MissingColumn(name) => PreprocessError::MissingColumn(name),
            other => PreprocessError::Table(other),
        }
    }
}

impl From<PolarsError> for PreprocessError {
    fn from(err: PolarsError) -> Self {
        PreprocessError::Table(TableError::from(err))
    }
}
