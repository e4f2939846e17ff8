//! Joins, Grouping and Concatenation

use crate::error::TableError;
use crate::table::{series_values, Table};
use crate::value::{Value, ValueKey};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Count of one distinct value in a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: Value,
    pub count: usize,
}

impl Table {
    /// Left outer join on a shared key column.
    ///
    /// Every left row appears exactly once, in order. Right columns other than
    /// the key are appended; unmatched rows get nulls. Null keys never match.
    /// If the right side repeats a key, the first occurrence wins. Colliding
    /// column names get `_x` (left) and `_y` (right) suffixes.
    pub fn left_join(&self, right: &Table, key: &str) -> Result<Table, TableError> {
        self.require_column(key)?;
        right.require_column(key)?;

        let mut right_frame = right.first_per_key(key)?.into_frame();
        let dropped = right.num_rows() - right_frame.height();
        if dropped > 0 {
            warn!(
                "Right table repeats or nulls {} keys on {}, keeping first occurrences",
                dropped, key
            );
        }

        let mut left_frame = self.frame().clone();
        for name in right.columns() {
            if name != key && self.has_column(&name) {
                left_frame.rename(&name, &format!("{}_x", name))?;
                right_frame.rename(&name, &format!("{}_y", name))?;
            }
        }
        align_key_types(&mut left_frame, &mut right_frame, key)?;

        let joined = left_frame.join(
            &right_frame,
            [key],
            [key],
            JoinArgs::new(JoinType::Left),
        )?;

        debug!(
            "Left join on {}: {} rows, {} columns",
            key,
            joined.height(),
            joined.width()
        );
        Ok(Table::from_frame(joined))
    }

    /// First row for each distinct non-null key, in first-appearance order
    pub fn first_per_key(&self, key: &str) -> Result<Table, TableError> {
        self.require_column(key)?;
        let nulls = [key];
        let subset = [key.to_string()];
        let frame = self
            .frame()
            .drop_nulls(Some(&nulls[..]))?
            .unique_stable(Some(&subset[..]), UniqueKeepStrategy::First, None)?;
        Ok(Table::from_frame(frame))
    }

    /// Stack tables vertically.
    ///
    /// Columns are the union of all inputs in first-seen order; cells for
    /// columns a table lacks are null. A column typed differently across
    /// inputs is widened to a float, or to text when not numeric.
    pub fn concat<'a>(tables: impl IntoIterator<Item = &'a Table>) -> Result<Table, TableError> {
        let tables: Vec<&Table> = tables.into_iter().collect();

        // (name, type, whether the type came from a column with values)
        let mut schema: Vec<(String, DataType, bool)> = Vec::new();
        for table in &tables {
            for series in table.frame().get_columns() {
                let name = series.name().to_string();
                let has_values = series.null_count() < series.len();
                let dtype = series.dtype();
                match schema.iter_mut().find(|(n, _, _)| *n == name) {
                    None => schema.push((name, dtype.clone(), has_values)),
                    Some(_) if !has_values => {}
                    Some((_, current, settled)) if !*settled => {
                        *current = dtype.clone();
                        *settled = true;
                    }
                    Some((_, current, _)) if current != dtype => *current = widen(current, dtype),
                    Some(_) => {}
                }
            }
        }

        let mut stacked: Option<DataFrame> = None;
        for table in &tables {
            let height = table.num_rows();
            let columns = schema
                .iter()
                .map(|(name, dtype, _)| match table.frame().column(name) {
                    Ok(series) => series.cast(dtype),
                    Err(_) => Ok(Series::full_null(name, height, dtype)),
                })
                .collect::<PolarsResult<Vec<_>>>()?;
            let frame = DataFrame::new(columns)?;
            match stacked.as_mut() {
                Some(acc) => {
                    acc.vstack_mut(&frame)?;
                }
                None => stacked = Some(frame),
            }
        }

        Ok(Table::from_frame(stacked.unwrap_or_else(DataFrame::empty)))
    }

    /// Counts of non-null values, most frequent first; ties keep first appearance
    pub fn value_counts(&self, column: &str) -> Result<Vec<ValueCount>, TableError> {
        let values = series_values(self.series(column)?)?;
        let mut positions: HashMap<ValueKey, usize> = HashMap::new();
        let mut counts: Vec<ValueCount> = Vec::new();
        for value in values {
            let Some(k) = value.key() else { continue };
            match positions.get(&k) {
                Some(&pos) => counts[pos].count += 1,
                None => {
                    positions.insert(k, counts.len());
                    counts.push(ValueCount { value, count: 1 });
                }
            }
        }
        // Stable sort keeps first-appearance order among equal counts
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(counts)
    }
}

/// Common type for a column seen with two different types
fn widen(a: &DataType, b: &DataType) -> DataType {
    if a.is_numeric() && b.is_numeric() {
        DataType::Float64
    } else {
        DataType::String
    }
}

/// Cast both join keys to a shared type so numeric and text keys can match
fn align_key_types(left: &mut DataFrame, right: &mut DataFrame, key: &str) -> Result<(), TableError> {
    let left_type = left.column(key)?.dtype().clone();
    let right_type = right.column(key)?.dtype().clone();
    if left_type == right_type {
        return Ok(());
    }

    let common = widen(&left_type, &right_type);
    let left_key = left.column(key)?.cast(&common)?;
    let right_key = right.column(key)?.cast(&common)?;
    left.with_column(left_key)?;
    right.with_column(right_key)?;
    Ok(())
}
