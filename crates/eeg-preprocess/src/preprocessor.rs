//! Raw EEG Session Preprocessor

use crate::error::PreprocessError;
use crate::transform::{convert_log_power, derive_unix_ms, drop_invalid_rows, drop_raw_columns};
use eeg_table::Table;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Frequency bands reported by the headset
pub const DEFAULT_FREQUENCY_BANDS: &[&str] = &["Delta", "Theta", "Alpha", "Beta", "Gamma"];

/// Electrode channels reported by the headset
pub const DEFAULT_ELECTRODE_CHANNELS: &[&str] = &["AF7", "AF8", "TP9", "TP10"];

/// Preprocessing options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Drop rows with a missing TimeStamp or Battery
    pub parse_na: bool,
    /// Convert `{band}_{channel}` columns from log10 power to linear power
    pub convert_log: bool,
    /// Bands to convert
    pub frequency_bands: Vec<String>,
    /// Channels to convert
    pub electrode_channels: Vec<String>,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            parse_na: true,
            convert_log: true,
            frequency_bands: DEFAULT_FREQUENCY_BANDS.iter().map(|s| s.to_string()).collect(),
            electrode_channels: DEFAULT_ELECTRODE_CHANNELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Load a raw session CSV and clean it.
///
/// The file is read once and closed before the cleaning steps run. Nothing is
/// written back to disk.
pub fn process_raw_eeg(
    source: impl AsRef<Path>,
    options: &PreprocessOptions,
) -> Result<Table, PreprocessError> {
    let source = source.as_ref();
    let table = Table::from_csv_path(source)?;
    let cleaned = process_table(table, options)?;
    info!(
        "Preprocessed {}: {} rows x {} columns",
        source.display(),
        cleaned.num_rows(),
        cleaned.num_columns()
    );
    Ok(cleaned)
}

/// Clean an already-loaded raw session table
pub fn process_table(mut table: Table, options: &PreprocessOptions) -> Result<Table, PreprocessError> {
    let raw_rows = table.num_rows();

    if options.parse_na {
        drop_invalid_rows(&mut table)?;
    }

    derive_unix_ms(&mut table)?;

    if options.convert_log {
        convert_log_power(&mut table, &options.frequency_bands, &options.electrode_channels)?;
    }

    drop_raw_columns(&mut table)?;

    debug!("Kept {} of {} raw rows", table.num_rows(), raw_rows);
    Ok(table)
}
