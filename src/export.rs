//! Export a [`Table`] to downloadable bytes.
//!
//! Two targets: delimited text (header row, no index column, nulls as empty fields) and the
//! binary `bincode` form that [`crate::loading::binary`] reads back. Both return a plain byte
//! payload independent of transport.

use crate::error::{CleanError, CleanResult};
use crate::types::Table;

/// Serialization target for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Delimited text.
    #[default]
    Delimited,
    /// Binary-serialized [`Table`].
    Binary,
}

impl ExportFormat {
    /// Conventional file extension for the exported payload.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Delimited => "csv",
            Self::Binary => "bin",
        }
    }
}

/// Serialize `table` to the chosen format.
pub fn export(table: &Table, format: ExportFormat) -> CleanResult<Vec<u8>> {
    match format {
        ExportFormat::Delimited => to_delimited_bytes(table),
        ExportFormat::Binary => to_binary_bytes(table),
    }
}

/// Serialize `table` as delimited text: one header record of column names, then one record per
/// row. Nulls serialize as empty fields.
pub fn to_delimited_bytes(table: &Table) -> CleanResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(table.column_names())?;
    for row in 0..table.row_count() {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|col| col.values[row].render())
            .collect();
        wtr.write_record(&record)?;
    }
    wtr.into_inner().map_err(|e| CleanError::Io(e.into_error()))
}

/// Serialize `table` to its binary form (the inverse of
/// [`crate::loading::binary::load_binary_from_bytes`]).
pub fn to_binary_bytes(table: &Table) -> CleanResult<Vec<u8>> {
    Ok(bincode::serialize(table)?)
}
