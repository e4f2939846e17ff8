//! Preprocessing Steps
//!
//! Each step takes the table by mutable reference and either completes or
//! returns an error; [`crate::process_table`] chains them.

use crate::error::PreprocessError;
use crate::timestamp::timestamp_to_unix_milliseconds;
use eeg_table::{Table, Value};
use polars::prelude::{AnyValue, DataType, NamedFrom, Series};
use tracing::debug;

/// Wall-clock timestamp column written by the headset software
pub const TIMESTAMP_COLUMN: &str = "TimeStamp";

/// Battery level column; empty on marker and status rows
pub const BATTERY_COLUMN: &str = "Battery";

/// Derived epoch-milliseconds column
pub const UNIX_MS_COLUMN: &str = "unix_ms";

/// Columns removed from every cleaned session
pub const DROPPED_COLUMNS: &[&str] = &[
    TIMESTAMP_COLUMN,
    "RAW_TP9",
    "RAW_AF7",
    "RAW_AF8",
    "RAW_TP10",
    "AUX_RIGHT",
];

/// Remove rows with a null TimeStamp, then rows with a null Battery
pub fn drop_invalid_rows(table: &mut Table) -> Result<(), PreprocessError> {
    table.require_column(TIMESTAMP_COLUMN)?;
    table.require_column(BATTERY_COLUMN)?;

    let no_timestamp = table.drop_nulls(TIMESTAMP_COLUMN)?;
    let no_battery = table.drop_nulls(BATTERY_COLUMN)?;
    debug!(
        "Dropped {} rows without timestamp and {} rows without battery",
        no_timestamp, no_battery
    );
    Ok(())
}

/// Set `unix_ms` from the TimeStamp column. Any unparseable row fails the step.
pub fn derive_unix_ms(table: &mut Table) -> Result<(), PreprocessError> {
    let values = table
        .column(TIMESTAMP_COLUMN)?
        .into_iter()
        .enumerate()
        .map(|(row, cell)| match cell {
            Value::Text(text) => timestamp_to_unix_milliseconds(&text).map_err(|e| match e {
                PreprocessError::Parse(msg) => PreprocessError::Parse(format!("row {}: {}", row, msg)),
                other => other,
            }),
            other => Err(PreprocessError::Parse(format!(
                "row {}: timestamp {:?} is not text",
                row, other
            ))),
        })
        .collect::<Result<Vec<i64>, _>>()?;

    table.set_series(Series::new(UNIX_MS_COLUMN, values))?;
    Ok(())
}

/// Name of the log-power column for a band and electrode channel
pub fn band_channel_column(band: &str, channel: &str) -> String {
    format!("{}_{}", band, channel)
}

/// Replace each `{band}_{channel}` log10 power cell `v` with `10^v`.
///
/// The column keeps its name. All columns are checked before any is
/// converted; an empty band or channel list is a no-op.
pub fn convert_log_power<B, C>(
    table: &mut Table,
    frequency_bands: &[B],
    electrode_channels: &[C],
) -> Result<(), PreprocessError>
where
    B: AsRef<str>,
    C: AsRef<str>,
{
    let columns: Vec<String> = frequency_bands
        .iter()
        .flat_map(|band| {
            electrode_channels
                .iter()
                .map(move |channel| band_channel_column(band.as_ref(), channel.as_ref()))
        })
        .collect();

    for column in &columns {
        table.require_column(column)?;
    }

    let converted = columns
        .iter()
        .map(|column| log_to_linear(table.series(column)?))
        .collect::<Result<Vec<_>, PreprocessError>>()?;
    for series in converted {
        table.set_series(series)?;
    }
    debug!("Converted {} log-power columns", columns.len());
    Ok(())
}

/// `10^v` for every value of a numeric column; nulls pass through.
///
/// A column holding only nulls counts as numeric. Any other non-numeric column
/// is rejected.
pub fn log_to_linear(series: &Series) -> Result<Series, PreprocessError> {
    let all_null = series.null_count() == series.len();
    if !series.dtype().is_numeric() && !all_null {
        let (row, cell) = (0..series.len())
            .find_map(|i| match series.get(i) {
                Ok(AnyValue::Null) | Err(_) => None,
                Ok(cell) => Some((i, Value::from(cell))),
            })
            .unwrap_or_default();
        return Err(PreprocessError::Parse(format!(
            "row {}: {} value {:?} is not numeric",
            row,
            series.name(),
            cell
        )));
    }

    let log_power = series.cast(&DataType::Float64)?;
    let linear: Vec<Option<f64>> = log_power
        .f64()?
        .into_iter()
        .map(|v| v.map(|v| 10f64.powf(v)))
        .collect();
    Ok(Series::new(series.name(), linear))
}

/// Remove TimeStamp and the raw/auxiliary signal columns
pub fn drop_raw_columns(table: &mut Table) -> Result<(), PreprocessError> {
    table.drop_columns(DROPPED_COLUMNS)?;
    Ok(())
}
