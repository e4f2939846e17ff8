//! Participant Statistics Report

use crate::sink::ReportSink;
use crate::summary::{summarize_participants, ParticipantSummary, AGE_COLUMN};
use crate::ReportError;
use eeg_table::Table;
use tracing::info;

/// Report sections and the attribute columns listed under each
const SECTIONS: &[(&str, &[&str])] = &[
    ("Sex Statistics", &["sex"]),
    ("VR Statistics", &["vr_experience", "vr_frequency", "vr_sickness"]),
    ("Age Statistics", &[AGE_COLUMN]),
    ("Vision Statistics", &["corrective_vision", "vision_condition"]),
    ("Neural Statistics", &["neural_diagnosis", "neural_condition"]),
];

/// Heading of the optional per-participant table
pub const PARTICIPANT_DATA_HEADING: &str = "Participant Data";

/// Summarize merged records per participant and write the report to `sink`
pub fn participant_stats(
    records: &Table,
    emit_table: bool,
    sink: &mut dyn ReportSink,
) -> Result<(), ReportError> {
    let summary = summarize_participants(records)?;
    report_summary(&summary, emit_table, sink)
}

/// Write an already computed summary to `sink`
pub fn report_summary(
    summary: &ParticipantSummary,
    emit_table: bool,
    sink: &mut dyn ReportSink,
) -> Result<(), ReportError> {
    for (title, columns) in SECTIONS {
        sink.heading(title)?;
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                sink.line("")?;
            }
            write_counts(summary, column, sink)?;
        }
        if columns.contains(&AGE_COLUMN) {
            sink.line("")?;
            sink.line(&format!("Age Mean: {}", format_stat(summary.age.mean)))?;
            sink.line(&format!("Age Median: {}", format_stat(summary.age.median)))?;
            sink.line(&format!("Age SD: {}", format_stat(summary.age.std_dev)))?;
        }
    }

    if emit_table {
        sink.heading(PARTICIPANT_DATA_HEADING)?;
        sink.table(&summary.participants)?;
    }

    info!("Reported statistics for {} participants", summary.participant_count);
    Ok(())
}

fn write_counts(
    summary: &ParticipantSummary,
    column: &str,
    sink: &mut dyn ReportSink,
) -> Result<(), ReportError> {
    sink.line(column)?;
    let Some(counts) = summary.counts(column) else {
        return Ok(());
    };
    let labels: Vec<String> = counts.counts.iter().map(|c| c.value.to_string()).collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    for (label, count) in labels.iter().zip(&counts.counts) {
        sink.line(&format!("{:<width$}    {}", label, count.count, width = width))?;
    }
    Ok(())
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NaN".to_string(),
    }
}
