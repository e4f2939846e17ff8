//! Dataframe-Backed Table

use crate::error::TableError;
use crate::value::Value;
use polars::prelude::*;
use tracing::debug;

/// Ordered named columns over a polars [`DataFrame`].
///
/// Columns are typed per column by the frame. All mutating operations check
/// their preconditions before touching the data, so a failed call leaves the
/// table unchanged.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
}

impl Default for Table {
    fn default() -> Self {
        Self::from_frame(DataFrame::empty())
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.columns() == other.columns() && self.frame.equals_missing(&other.frame)
    }
}

impl Table {
    /// Create an empty table with the given text columns
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Self, TableError> {
        let names = unique_names(columns)?;
        let series = names
            .iter()
            .map(|name| Series::new_empty(name, &DataType::String))
            .collect();
        Ok(Self::from_frame(DataFrame::new(series)?))
    }

    /// Create a table from columns and rows; each column takes the common type of its cells
    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self, TableError> {
        let names = unique_names(columns)?;
        if let Some(row) = rows.iter().find(|row| row.len() != names.len()) {
            return Err(TableError::ShapeMismatch {
                expected: names.len(),
                actual: row.len(),
            });
        }

        let series = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let cells: Vec<AnyValue> = rows.iter().map(|row| row[i].as_any_value()).collect();
                series_from_cells(name, &cells)
            })
            .collect::<Result<Vec<_>, TableError>>()?;
        Ok(Self::from_frame(DataFrame::new(series)?))
    }

    /// Wrap an existing frame
    pub fn from_frame(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Underlying frame
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Unwrap into the underlying frame
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Column names in order
    pub fn columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.frame.width()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Position of a column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.frame.get_column_index(name)
    }

    /// Whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of a column, or `MissingColumn`
    pub fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Typed column, or `MissingColumn`
    pub fn series(&self, name: &str) -> Result<&Series, TableError> {
        self.require_column(name)?;
        Ok(self.frame.column(name)?)
    }

    /// Cells of one column in row order
    pub fn column(&self, name: &str) -> Result<Vec<Value>, TableError> {
        series_values(self.series(name)?)
    }

    /// Cell at a row and column
    pub fn get(&self, row: usize, column: &str) -> Option<Value> {
        let series = self.series(column).ok()?;
        if row >= series.len() {
            return None;
        }
        series.get(row).ok().map(Value::from)
    }

    /// One row of cells in column order
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.num_rows() {
            return None;
        }
        self.frame
            .get_columns()
            .iter()
            .map(|series| series.get(row).ok().map(Value::from))
            .collect()
    }

    /// All rows, materialized as cells
    pub fn rows(&self) -> Vec<Vec<Value>> {
        (0..self.num_rows()).filter_map(|i| self.row(i)).collect()
    }

    /// Append a column at the end
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<(), TableError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        self.set_column(&name, values)
    }

    /// Append a column holding the same value in every row
    pub fn add_constant_column(&mut self, name: impl Into<String>, value: Value) -> Result<(), TableError> {
        let values = vec![value; self.num_rows()];
        self.add_column(name, values)
    }

    /// Replace a column's cells, or append the column if it does not exist yet
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) -> Result<(), TableError> {
        let cells: Vec<AnyValue> = values.iter().map(Value::as_any_value).collect();
        self.set_series(series_from_cells(name, &cells)?)
    }

    /// Replace the column named like `series`, or append it
    pub fn set_series(&mut self, series: Series) -> Result<(), TableError> {
        if self.num_columns() > 0 && series.len() != self.num_rows() {
            return Err(TableError::ShapeMismatch {
                expected: self.num_rows(),
                actual: series.len(),
            });
        }
        self.frame.with_column(series)?;
        Ok(())
    }

    /// Remove columns by name. Fails without mutating if any is absent.
    pub fn drop_columns(&mut self, names: &[&str]) -> Result<(), TableError> {
        for name in names {
            self.require_column(name)?;
        }

        let mut frame = self.frame.clone();
        for name in names {
            if frame.get_column_index(name).is_some() {
                frame = frame.drop(name)?;
            }
        }
        self.frame = frame;
        debug!("Dropped {} columns, {} remain", names.len(), self.num_columns());
        Ok(())
    }

    /// Keep rows whose mask entry is true
    pub fn filter_rows(&mut self, keep: &[bool]) -> Result<(), TableError> {
        if keep.len() != self.num_rows() {
            return Err(TableError::ShapeMismatch {
                expected: self.num_rows(),
                actual: keep.len(),
            });
        }
        let mask = BooleanChunked::from_slice("keep", keep);
        self.frame = self.frame.filter(&mask)?;
        Ok(())
    }

    /// Remove rows where the column is null, returning how many were removed
    pub fn drop_nulls(&mut self, name: &str) -> Result<usize, TableError> {
        self.require_column(name)?;
        let before = self.num_rows();
        let subset = [name];
        self.frame = self.frame.drop_nulls(Some(&subset[..]))?;
        Ok(before - self.num_rows())
    }
}

fn unique_names<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Vec<String>, TableError> {
    let mut names: Vec<String> = Vec::new();
    for name in columns {
        let name = name.into();
        if names.contains(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        names.push(name);
    }
    Ok(names)
}

/// Build a column from cells, widening to their common type
pub(crate) fn series_from_cells(name: &str, cells: &[AnyValue]) -> Result<Series, TableError> {
    Ok(Series::from_any_values(name, cells, false)?)
}

/// Cells of a column in row order
pub(crate) fn series_values(series: &Series) -> Result<Vec<Value>, TableError> {
    (0..series.len())
        .map(|i| Ok(Value::from(series.get(i)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Table {
        Table::from_rows(
            ["a", "b"],
            vec![
                vec![Value::Int(1), Value::from("x")],
                vec![Value::Null, Value::from("y")],
                vec![Value::Int(3), Value::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_column_rejected() {
        assert!(matches!(
            Table::new(["a", "a"]),
            Err(TableError::DuplicateColumn(_))
        ));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let result = Table::from_rows(["a", "b"], vec![vec![Value::Int(1)]]);
        assert!(matches!(
            result,
            Err(TableError::ShapeMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_columns_are_typed() {
        let table = sample();
        assert_eq!(table.series("a").unwrap().dtype(), &DataType::Int64);
        assert_eq!(table.series("b").unwrap().dtype(), &DataType::String);
        assert_eq!(table.get(1, "a"), Some(Value::Null));
        assert_eq!(table.get(3, "a"), None);
    }

    #[test]
    fn test_drop_columns_all_or_nothing() {
        let mut table = sample();
        assert!(matches!(
            table.drop_columns(&["a", "missing"]),
            Err(TableError::MissingColumn(name)) if name == "missing"
        ));
        assert_eq!(table.num_columns(), 2);

        table.drop_columns(&["a"]).unwrap();
        assert_eq!(table.columns(), vec!["b".to_string()]);
        assert_eq!(table.row(0), Some(vec![Value::from("x")]));
    }

    #[test]
    fn test_drop_nulls() {
        let mut table = sample();
        assert_eq!(table.drop_nulls("a").unwrap(), 1);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.drop_nulls("b").unwrap(), 1);
        assert_eq!(table.num_rows(), 1);
        assert!(table.drop_nulls("missing").is_err());
    }

    #[test]
    fn test_filter_rows_by_mask() {
        let mut table = sample();
        assert!(table.filter_rows(&[true]).is_err());
        table.filter_rows(&[false, true, true]).unwrap();
        assert_eq!(table.column("b").unwrap(), vec![Value::from("y"), Value::Null]);
    }

    #[test]
    fn test_set_column_replaces_in_place_or_appends() {
        let mut table = sample();
        table
            .set_column("a", vec![Value::Int(7), Value::Int(8), Value::Int(9)])
            .unwrap();
        assert_eq!(table.columns()[0], "a");
        assert_eq!(table.get(1, "a"), Some(Value::Int(8)));

        table.set_column("c", vec![Value::from("z"); 3]).unwrap();
        assert_eq!(table.columns().last().map(String::as_str), Some("c"));

        assert!(table.set_column("c", vec![Value::Null]).is_err());
        assert!(matches!(
            table.add_column("a", vec![Value::Null; 3]),
            Err(TableError::DuplicateColumn(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_drop_columns_is_all_or_nothing(
            present in proptest::sample::subsequence(vec!["a", "b"], 0..=2),
            include_missing in any::<bool>(),
        ) {
            let mut table = sample();
            let mut names = present.clone();
            if include_missing {
                names.push("missing");
            }
            let result = table.drop_columns(&names);
            if include_missing {
                prop_assert!(result.is_err());
                prop_assert_eq!(table, sample());
            } else {
                prop_assert!(result.is_ok());
                prop_assert_eq!(table.num_columns(), 2 - present.len());
            }
        }
    }
}
