//! EEG Session Preprocessing
//!
//! Cleans raw headset session logs: drops incomplete rows, converts local
//! timestamps to epoch milliseconds, inverts the log10 band-power encoding and
//! removes raw signal columns.

mod error;
mod preprocessor;
mod scan;
mod timestamp;
mod transform;

pub use error::PreprocessError;
pub use preprocessor::{
    process_raw_eeg, process_table, PreprocessOptions, DEFAULT_ELECTRODE_CHANNELS,
    DEFAULT_FREQUENCY_BANDS,
};
pub use scan::{immediate_files, immediate_subdirectories};
pub use timestamp::{
    timestamp_to_unix_milliseconds, timestamp_to_unix_seconds, timestamp_to_unix_seconds_with,
    TIMESTAMP_FORMAT,
};
pub use transform::{
    band_channel_column, convert_log_power, derive_unix_ms, drop_invalid_rows, drop_raw_columns,
    log_to_linear, BATTERY_COLUMN, DROPPED_COLUMNS, TIMESTAMP_COLUMN, UNIX_MS_COLUMN,
};
