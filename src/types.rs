//! Core data model for the cleaning pipeline.
//!
//! A [`Table`] is an ordered list of named, homogeneously typed [`Column`]s; rows are aligned by
//! position across columns. Loading produces a `Table`, every cleaning stage mutates it in place,
//! and export serializes it back out.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Logical column type.
///
/// `Object` marks a column with mixed or untyped cells (for example after filling a numeric
/// column's nulls with sentinel text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// Boolean.
    Bool,
    /// 8-bit signed integer ("byte").
    Int8,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Calendar date and time of day (no time zone).
    DateTime,
    /// Time of day (no date).
    Time,
    /// UTF-8 text.
    Utf8,
    /// Mixed/untyped cells.
    Object,
}

impl DataType {
    /// Whether values of this type participate in numeric statistics (mean/median/zero-fill).
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int8 | Self::Int64 | Self::Float64)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Utf8 => "utf8",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 8-bit signed integer.
    Int8(i8),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Date and time of day.
    DateTime(NaiveDateTime),
    /// Time of day.
    Time(NaiveTime),
    /// UTF-8 text.
    Utf8(String),
}

impl Value {
    /// Whether this cell is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of this cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int8(v) => Some(f64::from(*v)),
            Self::Int64(v) => Some(*v as f64),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Text rendering used for delimited export and string conversion.
    ///
    /// `Null` renders as the empty string; datetimes render as `YYYY-MM-DD HH:MM:SS`.
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(v) => v.to_string(),
            Self::Int8(v) => v.to_string(),
            Self::Int64(v) => v.to_string(),
            Self::Float64(v) => v.to_string(),
            Self::DateTime(v) => v.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Time(v) => v.format("%H:%M:%S").to_string(),
            Self::Utf8(v) => v.clone(),
        }
    }
}

/// A named column: declared type plus cell values.
///
/// The declared [`DataType`] describes the non-null cells; `Null`s may appear in any column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (unique within a [`Table`]).
    pub name: String,
    /// Declared type of the non-null cells.
    pub dtype: DataType,
    /// Cell values, one per row.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, dtype: DataType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    /// Number of cells (rows) in the column.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Whether this column participates in numeric statistics.
    pub fn is_numeric(&self) -> bool {
        self.dtype.is_numeric()
    }
}

/// In-memory tabular dataset: ordered, uniquely named columns of equal length.
///
/// Cleaning stages mutate the table in place; there is no identity beyond the in-memory value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Ordered column storage.
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a table from columns.
    ///
    /// # Panics
    ///
    /// Panics if columns differ in length or share a name.
    pub fn new(columns: Vec<Column>) -> Self {
        if let Some(first) = columns.first() {
            for col in &columns {
                assert!(
                    col.len() == first.len(),
                    "column '{}' has {} rows, expected {}",
                    col.name,
                    col.len(),
                    first.len()
                );
            }
        }
        for (i, col) in columns.iter().enumerate() {
            assert!(
                !columns[..i].iter().any(|c| c.name == col.name),
                "duplicate column name '{}'",
                col.name
            );
        }
        Self { columns }
    }

    /// Create a table with no columns and no rows.
    pub fn empty() -> Self {
        Self { columns: Vec::new() }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterate column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns the position of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns a column by name, if present.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns a mutable column by name, if present.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Keep only rows where `keep` is `true`, across every column.
    ///
    /// `keep` must have one entry per row.
    pub(crate) fn retain_rows(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.row_count());
        for col in &mut self.columns {
            let mut i = 0;
            col.values.retain(|_| {
                let k = keep.get(i).copied().unwrap_or(false);
                i += 1;
                k
            });
        }
    }

    /// Rebuild every column from the given row indices, in the given order.
    ///
    /// Used by sampling (subset) and sorting (permutation). Indices must be in range.
    pub(crate) fn take_rows(&mut self, indices: &[usize]) {
        for col in &mut self.columns {
            col.values = indices.iter().map(|&i| col.values[i].clone()).collect();
        }
    }
}
