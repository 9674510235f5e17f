#![cfg(feature = "excel")]

//! Spreadsheet/workbook loading (feature-gated behind `excel`).

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDateTime;

use crate::error::{CleanError, CleanResult};
use crate::types::{Column, DataType, Table, Value};

use super::{unique_column_names, LoadLimits, SheetSelection, WorkbookOptions};

/// Load one sheet of a workbook (`.xlsx`, `.xls`, `.ods`, ...) into a [`Table`].
///
/// Behavior:
/// - Picks the sheet per [`SheetSelection`] (named sheet, or the first one)
/// - `header_row` is 1-based and must fall inside the sheet; rows above it are discarded
/// - The header row supplies column names (empty header cells get positional names)
/// - Cell values convert to typed [`Value`]s; each column's type is inferred from its cells
pub fn load_workbook_from_path(
    path: impl AsRef<Path>,
    options: &WorkbookOptions,
    limits: &LoadLimits,
) -> CleanResult<Table> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match &options.sheet {
        SheetSelection::Named(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(CleanError::UnknownSheet {
                    sheet: name.clone(),
                });
            }
            name.clone()
        }
        SheetSelection::First => {
            workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| CleanError::UnknownSheet {
                    sheet: "<first>".to_string(),
                })?
        }
    };

    let range = workbook.worksheet_range(&sheet)?;
    let rows: Vec<&[Data]> = range.rows().collect();

    if options.header_row == 0 || options.header_row > rows.len() {
        return Err(CleanError::HeaderRowOutOfRange {
            header_row: options.header_row,
            row_count: rows.len(),
        });
    }
    let header_idx = options.header_row - 1;

    let headers = unique_column_names(
        rows[header_idx]
            .iter()
            .enumerate()
            .map(|(i, c)| header_name(i, c))
            .collect(),
    );
    let width = headers.len();

    let data_rows = &rows[header_idx + 1..];
    limits.check_rows(data_rows.len())?;

    let mut cells: Vec<Vec<Value>> = vec![Vec::with_capacity(data_rows.len()); width];
    for row in data_rows {
        for (idx, out) in cells.iter_mut().enumerate() {
            out.push(convert_cell(row.get(idx).unwrap_or(&Data::Empty)));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| finish_column(name, values))
        .collect();
    Ok(Table::new(columns))
}

fn header_name(idx: usize, cell: &Data) -> String {
    let text = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    };
    if text.is_empty() {
        format!("column_{}", idx + 1)
    } else {
        text
    }
}

fn convert_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => Value::Float64(*f),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Value::DateTime(naive),
            // Durations and out-of-range serials keep their raw serial number.
            None => Value::Float64(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Utf8(s.clone())),
        Data::DurationIso(s) => Value::Utf8(s.clone()),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Null
            } else {
                Value::Utf8(trimmed.to_string())
            }
        }
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Assign the column dtype from the cells actually seen.
///
/// A pure Int64/Float64 mix widens to Float64; any other mix is Object.
fn finish_column(name: String, mut values: Vec<Value>) -> Column {
    let mut seen: Option<DataType> = None;
    let mut mixed_numeric = false;
    let mut mixed_other = false;

    for v in &values {
        let t = match v {
            Value::Null => continue,
            Value::Bool(_) => DataType::Bool,
            Value::Int8(_) => DataType::Int8,
            Value::Int64(_) => DataType::Int64,
            Value::Float64(_) => DataType::Float64,
            Value::DateTime(_) => DataType::DateTime,
            Value::Time(_) => DataType::Time,
            Value::Utf8(_) => DataType::Utf8,
        };
        match seen {
            None => seen = Some(t),
            Some(prev) if prev == t => {}
            Some(prev) => {
                if prev.is_numeric() && t.is_numeric() {
                    mixed_numeric = true;
                    seen = Some(DataType::Float64);
                } else {
                    mixed_other = true;
                }
            }
        }
    }

    let dtype = if mixed_other {
        DataType::Object
    } else {
        seen.unwrap_or(DataType::Utf8)
    };

    if mixed_numeric && dtype == DataType::Float64 {
        for v in &mut values {
            if let Value::Int64(i) = v {
                *v = Value::Float64(*i as f64);
            }
        }
    }

    Column::new(name, dtype, values)
}

#[cfg(test)]
mod tests {
    use super::finish_column;
    use crate::types::{DataType, Value};

    #[test]
    fn uniform_int_column_stays_int() {
        let col = finish_column("n".to_string(), vec![Value::Int64(1), Value::Null]);
        assert_eq!(col.dtype, DataType::Int64);
    }

    #[test]
    fn numeric_mix_widens_to_float() {
        let col = finish_column(
            "n".to_string(),
            vec![Value::Int64(1), Value::Float64(2.5)],
        );
        assert_eq!(col.dtype, DataType::Float64);
        assert_eq!(col.values[0], Value::Float64(1.0));
    }

    #[test]
    fn text_and_number_mix_becomes_object() {
        let col = finish_column(
            "n".to_string(),
            vec![Value::Int64(1), Value::Utf8("x".to_string())],
        );
        assert_eq!(col.dtype, DataType::Object);
        assert_eq!(col.values[0], Value::Int64(1));
    }

    #[test]
    fn all_null_column_defaults_to_utf8() {
        let col = finish_column("n".to_string(), vec![Value::Null, Value::Null]);
        assert_eq!(col.dtype, DataType::Utf8);
    }
}
