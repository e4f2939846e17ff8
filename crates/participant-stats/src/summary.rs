//! Per-Participant Summary

use crate::statistics::NumericStatistics;
use crate::ReportError;
use eeg_table::{Table, Value, ValueCount};
use participants::{PARTICIPANT_COLUMN, REGISTRY_ATTRIBUTES};
use serde::Serialize;
use tracing::debug;

/// Column holding participant age
pub const AGE_COLUMN: &str = "age";

/// Value counts of one attribute column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCounts {
    pub column: String,
    pub counts: Vec<ValueCount>,
}

/// Descriptive statistics over one row per participant
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantSummary {
    /// Number of distinct participants
    pub participant_count: usize,
    /// Value counts for every registry attribute, in registry order
    pub categories: Vec<CategoryCounts>,
    /// Numeric age statistics; non-numeric ages are excluded
    pub age: NumericStatistics,
    /// First row seen for each participant
    #[serde(skip)]
    pub participants: Table,
}

impl ParticipantSummary {
    /// Value counts for an attribute column
    pub fn counts(&self, column: &str) -> Option<&CategoryCounts> {
        self.categories.iter().find(|c| c.column == column)
    }
}

/// Collapse records to the first row per participant and summarize them.
///
/// Empty input yields an empty summary without checking columns.
pub fn summarize_participants(records: &Table) -> Result<ParticipantSummary, ReportError> {
    if records.is_empty() {
        return Ok(ParticipantSummary {
            participant_count: 0,
            categories: REGISTRY_ATTRIBUTES
                .iter()
                .map(|column| CategoryCounts {
                    column: column.to_string(),
                    counts: Vec::new(),
                })
                .collect(),
            age: NumericStatistics::default(),
            participants: records.clone(),
        });
    }

    for column in REGISTRY_ATTRIBUTES {
        records.require_column(column)?;
    }
    let participants = records.first_per_key(PARTICIPANT_COLUMN)?;
    debug!(
        "Collapsed {} records to {} participants",
        records.num_rows(),
        participants.num_rows()
    );

    let categories = REGISTRY_ATTRIBUTES
        .iter()
        .map(|column| {
            Ok(CategoryCounts {
                column: column.to_string(),
                counts: participants.value_counts(column)?,
            })
        })
        .collect::<Result<Vec<_>, ReportError>>()?;

    let ages: Vec<f64> = participants
        .column(AGE_COLUMN)?
        .iter()
        .filter_map(numeric_age)
        .collect();

    Ok(ParticipantSummary {
        participant_count: participants.num_rows(),
        categories,
        age: NumericStatistics::compute(&ages),
        participants,
    })
}

/// Age as a number; a text column keeps its numeric entries
fn numeric_age(cell: &Value) -> Option<f64> {
    let age = match cell {
        Value::Text(text) => text.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    };
    age.filter(|a| a.is_finite())
}
