//! Tabular Values
//!
//! A thin cell-level API over polars dataframes: CSV IO, column transforms,
//! joins and grouping. Every pipeline stage consumes and produces a [`Table`].

mod csv_io;
mod error;
mod relational;
mod table;
mod value;

pub use error::TableError;
pub use relational::ValueCount;
pub use table::Table;
pub use value::{Value, ValueKey, NA_MARKERS};
