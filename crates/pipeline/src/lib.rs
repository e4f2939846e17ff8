//! EEG Batch Pipeline
//!
//! Cleans every session under a sessions directory, merges the participant
//! registry, applies exclusions, writes the cleaned records and reports
//! participant statistics.

mod settings;

pub use settings::{PipelineConfig, DEFAULT_CONFIG_NAME, ENV_PREFIX};

use anyhow::{bail, Context, Result};
use eeg_preprocess::{immediate_files, immediate_subdirectories, process_raw_eeg, PreprocessOptions};
use eeg_table::{Table, Value};
use participant_stats::{report_summary, summarize_participants, ParticipantSummary, ReportSink};
use participants::{filter_out_participants, merge_and_filter_participants, PARTICIPANT_COLUMN};
use std::path::Path;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Column tagging each row with the session file it came from
pub const SESSION_COLUMN: &str = "session";

/// Result of one pipeline run
#[derive(Debug)]
pub struct RunOutcome {
    /// Cleaned (and, with a registry, merged and filtered) records
    pub records: Table,
    /// Participant statistics; only computed when a registry is configured
    pub summary: Option<ParticipantSummary>,
}

/// Initialize logging to stderr so stdout carries only the report
pub fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Clean every `<sessions_dir>/<participant>/<session>.csv` and stack the results.
///
/// Rows gain `participant` (the directory name, kept as text even when it
/// reads like a number or a missing-value marker) and `session` (the file stem)
/// columns unless the file already carries them.
pub fn load_sessions(sessions_dir: &Path, options: &PreprocessOptions) -> Result<Table> {
    let mut sessions = Vec::new();
    let participant_dirs = immediate_subdirectories(sessions_dir)
        .with_context(|| format!("scanning {}", sessions_dir.display()))?;

    for participant in participant_dirs {
        let dir = sessions_dir.join(&participant);
        for file in immediate_files(&dir).with_context(|| format!("scanning {}", dir.display()))? {
            let path = dir.join(&file);
            if !is_csv(&path) {
                debug!("Skipping non-CSV file {}", path.display());
                continue;
            }

            let mut table = process_raw_eeg(&path, options)
                .with_context(|| format!("preprocessing {}", path.display()))?;
            if !table.has_column(PARTICIPANT_COLUMN) {
                table.add_constant_column(PARTICIPANT_COLUMN, Value::from(participant.as_str()))?;
            }
            if !table.has_column(SESSION_COLUMN) {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.clone());
                table.add_constant_column(SESSION_COLUMN, Value::from(stem))?;
            }
            sessions.push(table);
        }
    }

    if sessions.is_empty() {
        bail!("no session files found under {}", sessions_dir.display());
    }
    let combined = Table::concat(&sessions)?;
    info!(
        "Loaded {} sessions with {} rows in total",
        sessions.len(),
        combined.num_rows()
    );
    Ok(combined)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Configured exclusions as cell values.
///
/// Each entry matches both as text and as its inferred number, so `"7"`
/// excludes a participant whether the column holds `7` or `"7"`.
fn exclusion_values(entries: &[String]) -> Vec<Value> {
    let mut values = Vec::with_capacity(entries.len() * 2);
    for entry in entries {
        let text = Value::from(entry.as_str());
        let inferred = Value::parse(entry);
        if !inferred.is_null() && inferred != text {
            values.push(inferred);
        }
        values.push(text);
    }
    values
}

/// Run the whole pipeline, reporting statistics to `sink`
pub fn run(config: &PipelineConfig, sink: &mut dyn ReportSink) -> Result<RunOutcome> {
    let sessions = load_sessions(&config.sessions_dir, &config.preprocess)?;

    let excluded_participants = exclusion_values(&config.excluded_participants);
    let excluded_diagnoses = exclusion_values(&config.excluded_diagnoses);

    let (records, summary) = match &config.registry_path {
        Some(registry_path) => {
            let registry = Table::from_csv_path(registry_path)
                .with_context(|| format!("loading registry {}", registry_path.display()))?;
            let records = merge_and_filter_participants(
                &sessions,
                &registry,
                &excluded_participants,
                Some(&excluded_diagnoses),
            )?;
            let summary = summarize_participants(&records)?;
            report_summary(&summary, config.emit_table, sink)?;
            (records, Some(summary))
        }
        None => {
            warn!("No participant registry configured; skipping merge and statistics");
            if !excluded_diagnoses.is_empty() {
                warn!(
                    "Ignoring {} diagnosis exclusions: diagnoses come from the registry",
                    config.excluded_diagnoses.len()
                );
            }
            let records = filter_out_participants(&sessions, &excluded_participants, None)?;
            (records, None)
        }
    };

    if let Some(output_path) = &config.output_path {
        records
            .write_csv_path(output_path)
            .with_context(|| format!("writing {}", output_path.display()))?;
    }

    if let (Some(path), Some(summary)) = (&config.summary_json, &summary) {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, summary)?;
        info!("Wrote participant summary to {}", path.display());
    }

    Ok(RunOutcome { records, summary })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusion_values_cover_text_and_number() {
        let values = exclusion_values(&["7".to_string(), "P3".to_string(), "NA".to_string()]);
        assert_eq!(
            values,
            vec![
                Value::Int(7),
                Value::from("7"),
                Value::from("P3"),
                Value::from("NA"),
            ]
        );
    }
}
