//! Cell Values

use polars::prelude::AnyValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Markers treated as a missing value when reading text cells
pub const NA_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
];

/// A single table cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value
    #[default]
    Null,
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Anything that is not numeric
    Text(String),
}

impl Value {
    /// Infer a value from a raw text cell
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if NA_MARKERS.contains(&trimmed) {
            return Value::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_nan() {
                return Value::Null;
            }
            return Value::Float(f);
        }
        Value::Text(raw.to_string())
    }

    /// Whether the cell is missing
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell, if it holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrowed dataframe cell for building columns
    pub fn as_any_value(&self) -> AnyValue<'_> {
        match self {
            Value::Null => AnyValue::Null,
            Value::Int(i) => AnyValue::Int64(*i),
            Value::Float(f) => AnyValue::Float64(*f),
            Value::Text(s) => AnyValue::String(s),
        }
    }

    /// Hashable identity used for joins, grouping and membership tests.
    ///
    /// Integral floats share a key with the equal integer so `1` and `1.0`
    /// match. Nulls have no key and therefore never match anything.
    pub fn key(&self) -> Option<ValueKey> {
        match self {
            Value::Null => None,
            Value::Int(i) => Some(ValueKey::Int(*i)),
            Value::Float(f) => {
                if f.is_nan() {
                    None
                } else if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Some(ValueKey::Int(*f as i64))
                } else {
                    Some(ValueKey::Float(f.to_bits()))
                }
            }
            Value::Text(s) => Some(ValueKey::Text(s.clone())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<AnyValue<'_>> for Value {
    fn from(value: AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Value::Null,
            AnyValue::Int32(i) => Value::Int(i as i64),
            AnyValue::Int64(i) => Value::Int(i),
            AnyValue::UInt32(i) => Value::Int(i as i64),
            AnyValue::UInt64(i) => Value::Int(i as i64),
            AnyValue::Float32(f) => Value::Float(f as f64),
            AnyValue::Float64(f) if f.is_nan() => Value::Null,
            AnyValue::Float64(f) => Value::Float(f),
            AnyValue::String(s) => Value::Text(s.to_string()),
            AnyValue::StringOwned(s) => Value::Text(s.to_string()),
            other => Value::Text(other.to_string()),
        }
    }
}

/// Hashable form of a non-null [`Value`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Int(i64),
    Float(u64),
    Text(String),
}
