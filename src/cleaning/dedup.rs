//! Duplicate-row handling.
//!
//! A duplicate is exact full-row equality across *all* columns. Rows are compared through a
//! total key (floats by bit pattern), so comparison cannot fail; [`DuplicatePolicy::KeepAll`]
//! is the no-op path.

use std::collections::HashMap;

use crate::types::{Table, Value};

/// Which rows to keep among duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep every row (no-op).
    #[default]
    KeepAll,
    /// Drop every row that has a full-row duplicate anywhere, keeping none of them.
    RemoveAll,
    /// Keep the first occurrence of each duplicated row.
    KeepFirst,
    /// Keep the last occurrence of each duplicated row.
    KeepLast,
}

/// Hashable, totally comparable stand-in for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum CellKey {
    Null,
    Bool(bool),
    Int8(i8),
    Int64(i64),
    /// Float compared by bit pattern; NaN equals NaN, 0.0 and -0.0 differ.
    Float(u64),
    DateTime(chrono::NaiveDateTime),
    Time(chrono::NaiveTime),
    Text(String),
}

impl CellKey {
    pub(crate) fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(v) => Self::Bool(*v),
            Value::Int8(v) => Self::Int8(*v),
            Value::Int64(v) => Self::Int64(*v),
            Value::Float64(v) => Self::Float(v.to_bits()),
            Value::DateTime(v) => Self::DateTime(*v),
            Value::Time(v) => Self::Time(*v),
            Value::Utf8(v) => Self::Text(v.clone()),
        }
    }
}

fn row_key(table: &Table, row: usize) -> Vec<CellKey> {
    table
        .columns
        .iter()
        .map(|col| CellKey::of(&col.values[row]))
        .collect()
}

/// Remove duplicate rows per `policy`, mutating `table` in place.
pub fn apply_duplicate_policy(table: &mut Table, policy: DuplicatePolicy) {
    let rows = table.row_count();
    if policy == DuplicatePolicy::KeepAll || rows == 0 {
        return;
    }

    let keys: Vec<Vec<CellKey>> = (0..rows).map(|r| row_key(table, r)).collect();

    let mut first_seen: HashMap<&[CellKey], usize> = HashMap::with_capacity(rows);
    let mut last_seen: HashMap<&[CellKey], usize> = HashMap::with_capacity(rows);
    let mut counts: HashMap<&[CellKey], usize> = HashMap::with_capacity(rows);
    for (i, key) in keys.iter().enumerate() {
        first_seen.entry(key.as_slice()).or_insert(i);
        last_seen.insert(key.as_slice(), i);
        *counts.entry(key.as_slice()).or_insert(0) += 1;
    }

    let keep: Vec<bool> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| match policy {
            DuplicatePolicy::KeepAll => true,
            DuplicatePolicy::RemoveAll => counts[key.as_slice()] == 1,
            DuplicatePolicy::KeepFirst => first_seen[key.as_slice()] == i,
            DuplicatePolicy::KeepLast => last_seen[key.as_slice()] == i,
        })
        .collect();

    table.retain_rows(&keep);
}

/// Number of rows that have at least one full-row duplicate (counting all occurrences).
///
/// This is what an interactive shell shows before offering a [`DuplicatePolicy`].
pub fn duplicate_row_count(table: &Table) -> usize {
    let rows = table.row_count();
    let mut counts: HashMap<Vec<CellKey>, usize> = HashMap::with_capacity(rows);
    for r in 0..rows {
        *counts.entry(row_key(table, r)).or_insert(0) += 1;
    }
    counts.values().copied().filter(|&c| c > 1).sum()
}

#[cfg(test)]
mod tests {
    use super::{apply_duplicate_policy, duplicate_row_count, DuplicatePolicy};
    use crate::types::{Column, DataType, Table, Value};

    /// Rows [A, A, B] by full-row equality.
    fn aab_table() -> Table {
        Table::new(vec![
            Column::new(
                "x",
                DataType::Int64,
                vec![Value::Int64(1), Value::Int64(1), Value::Int64(2)],
            ),
            Column::new(
                "y",
                DataType::Utf8,
                vec![
                    Value::Utf8("a".to_string()),
                    Value::Utf8("a".to_string()),
                    Value::Utf8("b".to_string()),
                ],
            ),
        ])
    }

    #[test]
    fn keep_all_is_a_noop() {
        let mut table = aab_table();
        let before = table.clone();
        apply_duplicate_policy(&mut table, DuplicatePolicy::KeepAll);
        assert_eq!(table, before);
    }

    #[test]
    fn keep_first_yields_a_b() {
        let mut table = aab_table();
        apply_duplicate_policy(&mut table, DuplicatePolicy::KeepFirst);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("x").unwrap().values,
            vec![Value::Int64(1), Value::Int64(2)]
        );
    }

    #[test]
    fn remove_all_yields_b_only() {
        let mut table = aab_table();
        apply_duplicate_policy(&mut table, DuplicatePolicy::RemoveAll);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.column("x").unwrap().values, vec![Value::Int64(2)]);
    }

    #[test]
    fn keep_last_keeps_the_later_occurrence() {
        let mut table = Table::new(vec![Column::new(
            "x",
            DataType::Utf8,
            vec![
                Value::Utf8("a".to_string()),
                Value::Utf8("b".to_string()),
                Value::Utf8("a".to_string()),
            ],
        )]);
        apply_duplicate_policy(&mut table, DuplicatePolicy::KeepLast);
        assert_eq!(
            table.column("x").unwrap().values,
            vec![Value::Utf8("b".to_string()), Value::Utf8("a".to_string())]
        );
    }

    #[test]
    fn rows_differing_in_one_column_are_not_duplicates() {
        let mut table = Table::new(vec![
            Column::new(
                "x",
                DataType::Int64,
                vec![Value::Int64(1), Value::Int64(1)],
            ),
            Column::new(
                "y",
                DataType::Int64,
                vec![Value::Int64(2), Value::Int64(3)],
            ),
        ]);
        let before = table.clone();
        apply_duplicate_policy(&mut table, DuplicatePolicy::KeepFirst);
        assert_eq!(table, before);
    }

    #[test]
    fn null_rows_and_float_rows_deduplicate() {
        let mut table = Table::new(vec![Column::new(
            "x",
            DataType::Float64,
            vec![Value::Null, Value::Null, Value::Float64(1.5), Value::Float64(1.5)],
        )]);
        apply_duplicate_policy(&mut table, DuplicatePolicy::KeepFirst);
        assert_eq!(
            table.column("x").unwrap().values,
            vec![Value::Null, Value::Float64(1.5)]
        );
    }

    #[test]
    fn duplicate_row_count_counts_all_occurrences() {
        assert_eq!(duplicate_row_count(&aab_table()), 2);
    }
}
