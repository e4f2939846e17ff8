//! Participant Registry Merging
//!
//! Joins trial records with the participant registry and excludes records by
//! participant ID or neural diagnosis.

mod filter;
mod merge;

pub use filter::filter_out_participants;
pub use merge::{merge_and_filter_participants, merge_participants};

use eeg_table::TableError;
use thiserror::Error;

/// Join key shared by trial records and the registry
pub const PARTICIPANT_COLUMN: &str = "participant";

/// Registry column used for diagnosis exclusions
pub const NEURAL_DIAGNOSIS_COLUMN: &str = "neural_diagnosis";

/// Attribute columns expected in the participant registry
pub const REGISTRY_ATTRIBUTES: &[&str] = &[
    "sex",
    "age",
    "vr_experience",
    "vr_frequency",
    "vr_sickness",
    "corrective_vision",
    "vision_condition",
    NEURAL_DIAGNOSIS_COLUMN,
    "neural_condition",
];

/// Merge and filter errors
#[derive(Debug, Error)]
pub enum MergeError {
    /// Expected column absent
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Any other table failure
    #[error("Table error: {0}")]
    Table(TableError),
}

impl From<TableError> for MergeError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::MissingColumn(name) => MergeError::MissingColumn(name),
            other => MergeError::Table(other),
        }
    }
}
