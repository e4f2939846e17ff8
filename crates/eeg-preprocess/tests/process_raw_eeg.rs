//! End-to-end preprocessing of headset session files

use eeg_preprocess::{
    process_raw_eeg, PreprocessError, PreprocessOptions, DEFAULT_ELECTRODE_CHANNELS,
    DEFAULT_FREQUENCY_BANDS, UNIX_MS_COLUMN,
};
use eeg_table::Value;
use std::path::PathBuf;
use tempfile::TempDir;

const RAW_COLUMNS: &[&str] = &["RAW_TP9", "RAW_AF7", "RAW_AF8", "RAW_TP10", "AUX_RIGHT"];

fn header() -> Vec<String> {
    let mut columns = vec!["TimeStamp".to_string()];
    for band in DEFAULT_FREQUENCY_BANDS {
        for channel in DEFAULT_ELECTRODE_CHANNELS {
            columns.push(format!("{}_{}", band, channel));
        }
    }
    columns.extend(RAW_COLUMNS.iter().map(|c| c.to_string()));
    columns.push("HeadBandOn".to_string());
    columns.push("Battery".to_string());
    columns.push("Elements".to_string());
    columns
}

/// One data line: `log_power` in every band/channel cell
fn line(timestamp: &str, log_power: &str, battery: &str, elements: &str) -> String {
    let mut cells = vec![timestamp.to_string()];
    cells.extend(std::iter::repeat(log_power.to_string()).take(20));
    cells.extend(["801.1", "790.2", "805.3", "799.4", "0.0"].iter().map(|c| c.to_string()));
    cells.push("1".to_string());
    cells.push(battery.to_string());
    cells.push(elements.to_string());
    cells.join(",")
}

fn write_session(lines: &[String]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.csv");
    let mut text = header().join(",");
    text.push('\n');
    for l in lines {
        text.push_str(l);
        text.push('\n');
    }
    std::fs::write(&path, text).unwrap();
    (dir, path)
}

fn fixture() -> (TempDir, PathBuf) {
    write_session(&[
        line("2021-01-15 10:00:00.000", "0.5", "90", ""),
        line("2021-01-15 10:00:00.100", "", "", "/muse/elements/blink"),
        line("", "0.6", "90", "/Marker/1"),
        line("2021-01-15 10:00:01.000", "1.0", "89", ""),
    ])
}

#[test]
fn test_drops_invalid_rows_and_raw_columns() {
    let (_dir, path) = fixture();
    let table = process_raw_eeg(&path, &PreprocessOptions::default()).unwrap();

    assert_eq!(table.num_rows(), 2);
    for dropped in ["TimeStamp"].iter().chain(RAW_COLUMNS) {
        assert!(!table.has_column(dropped), "{} should be dropped", dropped);
    }
    assert!(table.has_column("Battery"));
    assert!(table.has_column("Elements"));
    assert!(!table.has_column("Alpha_AF7_Power"));
    // Converted power columns keep their positions; unix_ms follows the existing columns
    let columns = table.columns();
    assert_eq!(columns[0], "Delta_AF7");
    assert_eq!(columns[19], "Gamma_TP10");
    assert_eq!(columns.last().map(String::as_str), Some(UNIX_MS_COLUMN));

    let ms: Vec<i64> = table
        .column(UNIX_MS_COLUMN)
        .unwrap()
        .into_iter()
        .map(|v| match v {
            Value::Int(i) => i,
            other => panic!("unix_ms should be integer, got {:?}", other),
        })
        .collect();
    assert_eq!(ms[1] - ms[0], 1000);
}

#[test]
fn test_converts_every_band_channel_column() {
    let (_dir, path) = fixture();
    let table = process_raw_eeg(&path, &PreprocessOptions::default()).unwrap();

    for band in DEFAULT_FREQUENCY_BANDS {
        for channel in DEFAULT_ELECTRODE_CHANNELS {
            let name = format!("{}_{}", band, channel);
            let first = table.get(0, &name).and_then(|v| v.as_f64()).unwrap();
            let second = table.get(1, &name).and_then(|v| v.as_f64()).unwrap();
            assert!((first - 10f64.powf(0.5)).abs() < 1e-12, "{}", name);
            assert!((second - 10.0).abs() < 1e-12, "{}", name);
        }
    }
}

#[test]
fn test_convert_log_disabled_keeps_log_values() {
    let (_dir, path) = fixture();
    let options = PreprocessOptions {
        convert_log: false,
        ..Default::default()
    };
    let table = process_raw_eeg(&path, &options).unwrap();

    assert_eq!(table.get(0, "Delta_TP9"), Some(Value::Float(0.5)));
    assert_eq!(table.get(1, "Gamma_TP10"), Some(Value::Float(1.0)));
    for raw in RAW_COLUMNS {
        assert!(!table.has_column(raw));
    }
}

#[test]
fn test_empty_band_list_leaves_columns_untransformed() {
    let (_dir, path) = fixture();
    let options = PreprocessOptions {
        frequency_bands: Vec::new(),
        ..Default::default()
    };
    let table = process_raw_eeg(&path, &options).unwrap();
    assert_eq!(table.get(0, "Alpha_AF7"), Some(Value::Float(0.5)));
}

#[test]
fn test_header_only_source_yields_final_schema() {
    let (_dir, path) = write_session(&[]);
    let table = process_raw_eeg(&path, &PreprocessOptions::default()).unwrap();

    assert!(table.is_empty());
    // 20 band/channel + HeadBandOn + Battery + Elements + unix_ms
    assert_eq!(table.num_columns(), 24);
    assert!(table.has_column(UNIX_MS_COLUMN));
    assert!(!table.has_column("TimeStamp"));
}

#[test]
fn test_unparseable_timestamp_fails_whole_file() {
    let (_dir, path) = write_session(&[
        line("2021-01-15 10:00:00.000", "0.5", "90", ""),
        line("15/01/2021 10:00:01", "0.5", "90", ""),
    ]);
    let result = process_raw_eeg(&path, &PreprocessOptions::default());
    assert!(matches!(result, Err(PreprocessError::Parse(_))));
}

#[test]
fn test_null_timestamp_without_na_parsing_fails() {
    let (_dir, path) = fixture();
    let options = PreprocessOptions {
        parse_na: false,
        ..Default::default()
    };
    let result = process_raw_eeg(&path, &options);
    assert!(matches!(result, Err(PreprocessError::Parse(_))));
}

#[test]
fn test_missing_band_column_is_reported() {
    let (_dir, path) = fixture();
    let options = PreprocessOptions {
        electrode_channels: vec!["FPz".to_string()],
        ..Default::default()
    };
    let result = process_raw_eeg(&path, &options);
    assert!(matches!(
        result,
        Err(PreprocessError::MissingColumn(name)) if name == "Delta_FPz"
    ));
}

#[test]
fn test_missing_raw_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.csv");
    std::fs::write(
        &path,
        "TimeStamp,Battery\n2021-01-15 10:00:00.000,90\n",
    )
    .unwrap();
    let options = PreprocessOptions {
        convert_log: false,
        ..Default::default()
    };
    let result = process_raw_eeg(&path, &options);
    assert!(matches!(result, Err(PreprocessError::MissingColumn(_))));
}
