//! Registry Join

use crate::filter::filter_out_participants;
use crate::{MergeError, PARTICIPANT_COLUMN};
use eeg_table::{Table, Value};
use tracing::info;

/// Left outer join of trial records with the registry on `participant`.
///
/// Every trial row is kept exactly once; trial rows without a registry entry
/// get null attributes. The registry is expected to be unique on
/// `participant`; a repeated key is logged and its first row used.
pub fn merge_participants(records: &Table, registry: &Table) -> Result<Table, MergeError> {
    let merged = records.left_join(registry, PARTICIPANT_COLUMN)?;
    info!(
        "Merged {} trial rows with {} registry rows",
        records.num_rows(),
        registry.num_rows()
    );
    Ok(merged)
}

/// Merge with the registry, then drop excluded participants and diagnoses.
///
/// Diagnosis exclusions need the registry's `neural_diagnosis`, so the join
/// always runs first.
pub fn merge_and_filter_participants(
    records: &Table,
    registry: &Table,
    excluded_participants: &[Value],
    excluded_diagnoses: Option<&[Value]>,
) -> Result<Table, MergeError> {
    let merged = merge_participants(records, registry)?;
    filter_out_participants(&merged, excluded_participants, excluded_diagnoses)
}
