//! Lightweight statistical profiling of a [`Table`].
//!
//! The exploratory "summary report" counterpart to the cleaning pipeline: shape, per-column
//! null and distinct counts, and numeric statistics where they apply. [`TableProfile`]
//! implements [`Display`] as a plain-text report.

use std::collections::HashSet;
use std::fmt;
use std::fmt::Display;

use crate::cleaning::dedup::CellKey;
use crate::cleaning::nulls::{numeric_mean, numeric_median};
use crate::cleaning::shape::compare_values;
use crate::types::{Column, DataType, Table, Value};

/// Summary statistics for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Declared column type.
    pub dtype: DataType,
    /// Number of missing cells.
    pub null_count: usize,
    /// Number of distinct non-null values.
    pub distinct_count: usize,
    /// Smallest non-null value, if any.
    pub min: Option<Value>,
    /// Largest non-null value, if any.
    pub max: Option<Value>,
    /// Mean of the numeric cells (numeric columns only).
    pub mean: Option<f64>,
    /// Median of the numeric cells (numeric columns only).
    pub median: Option<f64>,
}

/// Summary statistics for a whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableProfile {
    /// Number of rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Per-column summaries, in column order.
    pub columns: Vec<ColumnProfile>,
}

/// Profile every column of `table`.
pub fn profile(table: &Table) -> TableProfile {
    TableProfile {
        row_count: table.row_count(),
        column_count: table.column_count(),
        columns: table.columns.iter().map(profile_column).collect(),
    }
}

fn profile_column(col: &Column) -> ColumnProfile {
    let mut distinct: HashSet<CellKey> = HashSet::new();
    let mut min: Option<&Value> = None;
    let mut max: Option<&Value> = None;
    for v in &col.values {
        if v.is_null() {
            continue;
        }
        distinct.insert(CellKey::of(v));
        min = Some(match min {
            Some(m) if compare_values(m, v).is_le() => m,
            _ => v,
        });
        max = Some(match max {
            Some(m) if compare_values(m, v).is_ge() => m,
            _ => v,
        });
    }

    let (mean, median) = if col.is_numeric() {
        (numeric_mean(col), numeric_median(col))
    } else {
        (None, None)
    };

    ColumnProfile {
        name: col.name.clone(),
        dtype: col.dtype,
        null_count: col.null_count(),
        distinct_count: distinct.len(),
        min: min.cloned(),
        max: max.cloned(),
        mean,
        median,
    }
}

impl Display for TableProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} rows x {} columns", self.row_count, self.column_count)?;
        for col in &self.columns {
            write!(
                f,
                "  {} ({}): nulls={} distinct={}",
                col.name, col.dtype, col.null_count, col.distinct_count
            )?;
            if let (Some(min), Some(max)) = (&col.min, &col.max) {
                write!(f, " min={} max={}", min.render(), max.render())?;
            }
            if let Some(mean) = col.mean {
                write!(f, " mean={mean}")?;
            }
            if let Some(median) = col.median {
                write!(f, " median={median}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
