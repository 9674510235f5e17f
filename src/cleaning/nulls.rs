//! Per-column null handling.
//!
//! Directives apply in declared order. `DropRow` removes rows from *every* column, so a later
//! directive operates on the already-filtered table; this cumulative behavior is intentional
//! interactive behavior and is preserved. Mean/median on a non-numeric column degrades to a
//! [`Diagnostic`], never a crash.

use crate::types::{Column, DataType, Table, Value};

use super::{Diagnostic, NullDirective};

/// Default sentinel used by [`NullPolicy::FillText`] builders.
pub const DEFAULT_FILL_TEXT: &str = "Not Available";

/// What to do with a column's missing values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NullPolicy {
    /// Leave nulls in place.
    #[default]
    Keep,
    /// Remove every row where this column is null (the rows are gone for all columns).
    DropRow,
    /// Replace nulls with a fixed sentinel string.
    FillText(String),
    /// Replace nulls with the column mean (numeric columns only).
    FillMean,
    /// Replace nulls with the column median (numeric columns only).
    FillMedian,
    /// Replace nulls with numeric zero.
    FillZero,
}

impl NullPolicy {
    /// `FillText` with the default sentinel.
    pub fn fill_default_text() -> Self {
        Self::FillText(DEFAULT_FILL_TEXT.to_string())
    }
}

/// Apply every [`NullDirective`] to `table` in declared order, collecting diagnostics.
pub fn apply_null_directives(
    table: &mut Table,
    directives: &[NullDirective],
    diagnostics: &mut Vec<Diagnostic>,
) {
    for directive in directives {
        if directive.policy == NullPolicy::Keep {
            continue;
        }
        let Some(idx) = table.index_of(&directive.column) else {
            diagnostics.push(Diagnostic::new(
                &directive.column,
                "column is no longer present; null directive skipped",
            ));
            continue;
        };

        match &directive.policy {
            NullPolicy::Keep => unreachable!("handled above"),
            NullPolicy::DropRow => {
                let keep: Vec<bool> = table.columns[idx]
                    .values
                    .iter()
                    .map(|v| !v.is_null())
                    .collect();
                table.retain_rows(&keep);
            }
            NullPolicy::FillText(text) => {
                let col = &mut table.columns[idx];
                fill_nulls(col, Value::Utf8(text.clone()));
                if col.dtype != DataType::Utf8 {
                    col.dtype = DataType::Object;
                }
            }
            NullPolicy::FillMean => {
                fill_statistic(&mut table.columns[idx], diagnostics, "mean", numeric_mean);
            }
            NullPolicy::FillMedian => {
                fill_statistic(&mut table.columns[idx], diagnostics, "median", numeric_median);
            }
            NullPolicy::FillZero => {
                let col = &mut table.columns[idx];
                match col.dtype {
                    DataType::Int8 => fill_nulls(col, Value::Int8(0)),
                    DataType::Int64 => fill_nulls(col, Value::Int64(0)),
                    DataType::Float64 => fill_nulls(col, Value::Float64(0.0)),
                    _ => {
                        fill_nulls(col, Value::Int64(0));
                        col.dtype = DataType::Object;
                    }
                }
            }
        }
    }
}

fn fill_nulls(col: &mut Column, fill: Value) {
    for v in &mut col.values {
        if v.is_null() {
            *v = fill.clone();
        }
    }
}

fn fill_statistic(
    col: &mut Column,
    diagnostics: &mut Vec<Diagnostic>,
    stat: &str,
    compute: fn(&Column) -> Option<f64>,
) {
    if !col.is_numeric() {
        diagnostics.push(Diagnostic::new(
            &col.name,
            format!("cannot fill nulls with {stat} of non-numeric column ({})", col.dtype),
        ));
        return;
    }
    let Some(fill) = compute(col) else {
        diagnostics.push(Diagnostic::new(
            &col.name,
            format!("cannot compute {stat}: column has no non-null values"),
        ));
        return;
    };

    // Filling a fractional statistic into an integer column widens it to float.
    if col.dtype != DataType::Float64 {
        for v in &mut col.values {
            if let Some(f) = v.as_f64() {
                *v = Value::Float64(f);
            }
        }
        col.dtype = DataType::Float64;
    }
    fill_nulls(col, Value::Float64(fill));
}

/// Mean of the non-null numeric cells, if any.
pub(crate) fn numeric_mean(col: &Column) -> Option<f64> {
    let nums: Vec<f64> = col.values.iter().filter_map(Value::as_f64).collect();
    if nums.is_empty() {
        return None;
    }
    Some(nums.iter().sum::<f64>() / nums.len() as f64)
}

/// Median of the non-null numeric cells, if any. Even counts average the middle pair.
pub(crate) fn numeric_median(col: &Column) -> Option<f64> {
    let mut nums: Vec<f64> = col.values.iter().filter_map(Value::as_f64).collect();
    if nums.is_empty() {
        return None;
    }
    nums.sort_by(f64::total_cmp);
    let mid = nums.len() / 2;
    if nums.len() % 2 == 1 {
        Some(nums[mid])
    } else {
        Some((nums[mid - 1] + nums[mid]) / 2.0)
    }
}
