//! Participant Exclusion Filter

use crate::{MergeError, NEURAL_DIAGNOSIS_COLUMN, PARTICIPANT_COLUMN};
use eeg_table::{Table, Value, ValueKey};
use std::collections::HashSet;
use tracing::info;

/// Remove rows for excluded participants or excluded diagnoses.
///
/// A row is dropped when its `participant` is in `excluded_participants`, or
/// when `excluded_diagnoses` is given, non-empty, and contains the row's
/// `neural_diagnosis`. Null cells never match.
pub fn filter_out_participants(
    records: &Table,
    excluded_participants: &[Value],
    excluded_diagnoses: Option<&[Value]>,
) -> Result<Table, MergeError> {
    let participants = key_set(excluded_participants);
    let participant_cells = records.column(PARTICIPANT_COLUMN)?;

    let diagnoses = excluded_diagnoses.filter(|d| !d.is_empty()).map(key_set);
    let diagnosis_cells = match diagnoses {
        Some(_) => Some(records.column(NEURAL_DIAGNOSIS_COLUMN)?),
        None => None,
    };

    let matches = |set: &HashSet<ValueKey>, cell: &Value| cell.key().is_some_and(|k| set.contains(&k));
    let keep: Vec<bool> = participant_cells
        .iter()
        .enumerate()
        .map(|(row, participant)| {
            let by_participant = matches(&participants, participant);
            let by_diagnosis = match (&diagnoses, &diagnosis_cells) {
                (Some(set), Some(cells)) => matches(set, &cells[row]),
                _ => false,
            };
            !(by_participant || by_diagnosis)
        })
        .collect();

    let mut filtered = records.clone();
    filtered.filter_rows(&keep)?;
    info!(
        "Filtered participants: kept {} of {} rows",
        filtered.num_rows(),
        records.num_rows()
    );
    Ok(filtered)
}

fn key_set(values: &[Value]) -> HashSet<ValueKey> {
    values.iter().filter_map(Value::key).collect()
}
