//! Row sampling, column projection, and multi-key sorting.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{CleanError, CleanResult};
use crate::types::{Table, Value};

use super::{Diagnostic, SampleSpec, SortKey};

/// Randomly downsample `table` to `spec.percent`% of its rows, preserving relative row order.
///
/// 100% is a strict no-op (same rows, same order). The kept count truncates
/// (`rows * percent / 100`), so small tables at low percentages may keep zero rows.
pub fn sample_rows(table: &mut Table, spec: &SampleSpec) {
    let percent = spec.percent.min(100);
    if percent >= 100 {
        return;
    }
    let rows = table.row_count();
    let target = rows * usize::from(percent) / 100;
    if target >= rows {
        return;
    }

    let mut rng = match spec.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut indices = rand::seq::index::sample(&mut rng, rows, target).into_vec();
    indices.sort_unstable();
    table.take_rows(&indices);
}

/// Restrict `table` to the named columns, in the given order.
///
/// An empty selection (or one where no name resolves) aborts with
/// [`CleanError::EmptySelection`]; names no longer present are reported as diagnostics and
/// skipped.
pub fn project_columns(
    table: &mut Table,
    keep: &[String],
    diagnostics: &mut Vec<Diagnostic>,
) -> CleanResult<()> {
    if keep.is_empty() {
        return Err(CleanError::EmptySelection);
    }

    let mut projected = Vec::with_capacity(keep.len());
    for name in keep {
        match table.index_of(name) {
            Some(idx) => projected.push(table.columns[idx].clone()),
            None => diagnostics.push(Diagnostic::new(
                name,
                "column is no longer present; dropped from selection",
            )),
        }
    }
    if projected.is_empty() {
        return Err(CleanError::EmptySelection);
    }

    table.columns = projected;
    Ok(())
}

/// Stable multi-key sort; earlier keys take precedence, nulls order last in either direction.
///
/// Keys naming absent columns are reported as diagnostics and ignored.
pub fn sort_rows(table: &mut Table, keys: &[SortKey], diagnostics: &mut Vec<Diagnostic>) {
    if keys.is_empty() {
        return;
    }

    let mut resolved: Vec<(usize, bool)> = Vec::with_capacity(keys.len());
    for key in keys {
        match table.index_of(&key.column) {
            Some(idx) => resolved.push((idx, key.descending)),
            None => diagnostics.push(Diagnostic::new(
                &key.column,
                "column is no longer present; sort key ignored",
            )),
        }
    }
    if resolved.is_empty() {
        return;
    }

    let mut order: Vec<usize> = (0..table.row_count()).collect();
    order.sort_by(|&a, &b| {
        for &(idx, descending) in &resolved {
            let va = &table.columns[idx].values[a];
            let vb = &table.columns[idx].values[b];
            let ord = match (va.is_null(), vb.is_null()) {
                (true, true) => Ordering::Equal,
                // Nulls sink to the end regardless of direction.
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let cmp = compare_values(va, vb);
                    if descending { cmp.reverse() } else { cmp }
                }
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    table.take_rows(&order);
}

/// Total order over non-null cells. Same-type cells compare naturally; numeric cells compare
/// cross-type through `f64`; anything else falls back to the text rendering.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Utf8(x), Value::Utf8(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::Time(x), Value::Time(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => a.render().cmp(&b.render()),
        },
    }
}
