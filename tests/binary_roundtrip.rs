use std::io::Write;

use tempfile::NamedTempFile;

use rust_data_cleaning::error::CleanError;
use rust_data_cleaning::export::{export, to_binary_bytes, ExportFormat};
use rust_data_cleaning::loading::{load_from_path, LoadOptions};
use rust_data_cleaning::types::{Column, DataType, Table, Value};

fn typed_table() -> Table {
    Table::new(vec![
        Column::new(
            "id",
            DataType::Int64,
            vec![Value::Int64(1), Value::Int64(2)],
        ),
        Column::new(
            "ratio",
            DataType::Float64,
            vec![Value::Float64(0.5), Value::Null],
        ),
        Column::new(
            "flag",
            DataType::Bool,
            vec![Value::Bool(true), Value::Bool(false)],
        ),
    ])
}

#[test]
fn binary_export_reloads_identically_via_extension_detection() {
    let table = typed_table();
    let bytes = to_binary_bytes(&table).unwrap();

    let mut file = NamedTempFile::with_suffix(".bin").unwrap();
    file.write_all(&bytes).unwrap();

    let reloaded = load_from_path(file.path(), &LoadOptions::default()).unwrap();
    // Unlike the delimited round trip, binary preserves types and nulls exactly.
    assert_eq!(reloaded, table);
}

#[test]
fn pickle_extension_maps_to_the_binary_loader() {
    let bytes = to_binary_bytes(&typed_table()).unwrap();
    let mut file = NamedTempFile::with_suffix(".pickle").unwrap();
    file.write_all(&bytes).unwrap();

    let reloaded = load_from_path(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(reloaded.row_count(), 2);
}

#[test]
fn binary_file_with_misaligned_columns_fails_the_load() {
    // Bytes that decode into unequal column lengths must never reach the pipeline,
    // where row permutation would index past the short column.
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
    let bytes = to_binary_bytes(&broken).unwrap();
    let mut file = NamedTempFile::with_suffix(".bin").unwrap();
    file.write_all(&bytes).unwrap();

    let err = load_from_path(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, CleanError::MalformedBinary { .. }));
}

#[test]
fn export_dispatch_matches_format_helpers() {
    let table = typed_table();
    assert_eq!(
        export(&table, ExportFormat::Binary).unwrap(),
        to_binary_bytes(&table).unwrap()
    );
    assert_eq!(ExportFormat::Delimited.extension(), "csv");
    assert_eq!(ExportFormat::Binary.extension(), "bin");
}
