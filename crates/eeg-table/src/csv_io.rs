//! CSV Reading and Writing

use crate::error::TableError;
use crate::table::Table;
use crate::value::NA_MARKERS;
use polars::prelude::*;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use tracing::{debug, info};

impl Table {
    /// Load a comma-separated file with a header row
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| TableError::Load {
            source_name: source_name.clone(),
            reason: e.to_string(),
        })?;
        let table = Self::read_csv(bytes, &source_name)?;
        info!(
            "Loaded {} rows x {} columns from {}",
            table.num_rows(),
            table.num_columns(),
            source_name
        );
        Ok(table)
    }

    /// Load comma-separated text with a header row from any reader
    pub fn from_csv_reader<R: Read>(mut reader: R) -> Result<Self, TableError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|e| TableError::Load {
            source_name: "<reader>".to_string(),
            reason: e.to_string(),
        })?;
        Self::read_csv(bytes, "<reader>")
    }

    fn read_csv(bytes: Vec<u8>, source_name: &str) -> Result<Self, TableError> {
        let null_values = NA_MARKERS.iter().map(|m| m.to_string()).collect();
        let parse_options =
            CsvParseOptions::default().with_null_values(Some(NullValues::AllColumns(null_values)));

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_parse_options(parse_options)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(|e| TableError::Load {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;

        debug!("Parsed {} records from {}", frame.height(), source_name);
        Ok(Table::from_frame(frame))
    }

    /// Write the table as comma-separated text to a file
    pub fn write_csv_path(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        self.write_csv(file)?;
        info!("Wrote {} rows to {}", self.num_rows(), path.display());
        Ok(())
    }

    /// Write the table as comma-separated text; nulls become empty cells
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<(), TableError> {
        let mut frame = self.frame().clone();
        CsvWriter::new(&mut writer)
            .include_header(true)
            .finish(&mut frame)
            .map_err(|e| TableError::Write(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_read_infers_column_types() {
        let data = "participant,age,sex\nP1,24,F\nP2,,M\nP3,NA,F\n";
        let table = Table::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(table.columns(), vec!["participant", "age", "sex"]);
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.get(0, "age"), Some(Value::Int(24)));
        assert_eq!(table.get(1, "age"), Some(Value::Null));
        assert_eq!(table.get(2, "age"), Some(Value::Null));
        assert_eq!(table.get(0, "participant"), Some(Value::from("P1")));
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let table = Table::from_csv_reader("a,b,c\n".as_bytes()).unwrap();
        assert_eq!(table.num_columns(), 3);
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Table::from_csv_path(dir.path().join("absent.csv"));
        assert!(matches!(result, Err(TableError::Load { .. })));
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = Table::from_rows(
            ["id", "power"],
            vec![
                vec![Value::from("P1"), Value::Float(12.5)],
                vec![Value::from("P2"), Value::Null],
            ],
        )
        .unwrap();
        table.write_csv_path(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "id,power\nP1,12.5\nP2,\n");
        assert_eq!(Table::from_csv_path(&path).unwrap(), table);
    }
}
