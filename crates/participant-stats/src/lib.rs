//! Participant Statistics
//!
//! Collapses merged trial records to one row per participant and reports
//! categorical value counts and age statistics through a [`ReportSink`].

mod reporter;
mod sink;
mod statistics;
mod summary;

pub use reporter::{participant_stats, report_summary, PARTICIPANT_DATA_HEADING};
pub use sink::{render_table, MemorySink, ReportEntry, ReportSink, WriterSink};
pub use statistics::NumericStatistics;
pub use summary::{summarize_participants, CategoryCounts, ParticipantSummary, AGE_COLUMN};

use eeg_table::TableError;
use thiserror::Error;

/// Reporting errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Expected column absent from non-empty input
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Sink failed to write
    #[error("Report output failed: {0}")]
    Io(#[from] std::io::Error),

    /// Any other table failure
    #[error("Table error: {0}")]
    Table(TableError),
}

impl From<TableError> for ReportError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::MissingColumn(name) => ReportError::MissingColumn(name),
            other => ReportError::Table(other),
        }
    }
}
