//! Binary table loading.
//!
//! The binary format is the `bincode` serialization of a [`Table`], exactly what
//! [`crate::export::to_binary_bytes`] writes. There are no further options.

use std::path::Path;

use crate::error::{CleanError, CleanResult};
use crate::types::Table;

use super::LoadLimits;

/// Load a binary-serialized [`Table`] from a file.
pub fn load_binary_from_path(path: impl AsRef<Path>, limits: &LoadLimits) -> CleanResult<Table> {
    let bytes = std::fs::read(path)?;
    limits.check_bytes(bytes.len() as u64)?;
    load_binary_from_bytes(&bytes, limits)
}

/// Deserialize a binary-serialized [`Table`] from bytes.
///
/// The decoded table is re-validated against the model invariants; bytes that decode into
/// misaligned columns or duplicate names are rejected, never handed to the pipeline.
pub fn load_binary_from_bytes(bytes: &[u8], limits: &LoadLimits) -> CleanResult<Table> {
    limits.check_bytes(bytes.len() as u64)?;
    let table: Table = bincode::deserialize(bytes)?;
    validate_table(&table)?;
    limits.check_rows(table.row_count())?;
    Ok(table)
}

// Deserialization bypasses `Table::new`, so the invariants it asserts are checked here.
fn validate_table(table: &Table) -> CleanResult<()> {
    let expected = table.row_count();
    for col in &table.columns {
        if col.len() != expected {
            return Err(CleanError::MalformedBinary {
                message: format!(
                    "column '{}' has {} rows, expected {expected}",
                    col.name,
                    col.len()
                ),
            });
        }
    }
    for (i, col) in table.columns.iter().enumerate() {
        if table.columns[..i].iter().any(|c| c.name == col.name) {
            return Err(CleanError::MalformedBinary {
                message: format!("duplicate column name '{}'", col.name),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::load_binary_from_bytes;
    use crate::error::CleanError;
    use crate::loading::LoadLimits;
    use crate::types::{Column, DataType, Table, Value};

    fn small_table() -> Table {
        Table::new(vec![Column::new(
            "id",
            DataType::Int64,
            vec![Value::Int64(1), Value::Int64(2)],
        )])
    }

    #[test]
    fn round_trips_through_bincode() {
        let table = small_table();
        let bytes = bincode::serialize(&table).unwrap();
        let loaded = load_binary_from_bytes(&bytes, &LoadLimits::default()).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn garbage_bytes_fail_cleanly() {
        let err = load_binary_from_bytes(&[0xFF; 16], &LoadLimits::default()).unwrap_err();
        assert!(matches!(err, CleanError::Binary(_)));
    }

    #[test]
    fn misaligned_columns_are_rejected_not_loaded() {
        // Built without `Table::new` so the bytes carry columns of unequal length.
        let broken = Table {
            columns: vec![
                Column::new(
                    "a",
                    DataType::Int64,
                    vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)],
                ),
                Column::new("b", DataType::Int64, vec![Value::Int64(9)]),
            ],
        };
        let bytes = bincode::serialize(&broken).unwrap();

        let err = load_binary_from_bytes(&bytes, &LoadLimits::default()).unwrap_err();
        match err {
            CleanError::MalformedBinary { message } => {
                assert!(message.contains("column 'b'"), "unexpected message: {message}");
            }
            other => panic!("expected MalformedBinary, got {other}"),
        }
    }

    #[test]
    fn duplicate_column_names_are_rejected_not_loaded() {
        let broken = Table {
            columns: vec![
                Column::new("x", DataType::Int64, vec![Value::Int64(1)]),
                Column::new("x", DataType::Int64, vec![Value::Int64(2)]),
            ],
        };
        let bytes = bincode::serialize(&broken).unwrap();

        let err = load_binary_from_bytes(&bytes, &LoadLimits::default()).unwrap_err();
        assert!(matches!(err, CleanError::MalformedBinary { .. }));
    }

    #[test]
    fn row_limit_applies_after_deserialization() {
        let bytes = bincode::serialize(&small_table()).unwrap();
        let limits = LoadLimits {
            max_rows: Some(1),
            ..Default::default()
        };
        let err = load_binary_from_bytes(&bytes, &limits).unwrap_err();
        assert!(matches!(err, CleanError::LimitExceeded { .. }));
    }
}
