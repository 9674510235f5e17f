//! Delimited-text loading.
//!
//! Bytes are decoded with a caller-chosen encoding first (see [`super::encodings`]), then parsed
//! with the `csv` crate. Records whose field count differs from the header are handled per the
//! [`BadLinePolicy`]: silently dropped, or failing the whole load with no partial table.
//!
//! Column types are inferred from the parsed cells: a column where every non-empty cell parses
//! as an integer becomes [`DataType::Int64`], then [`DataType::Float64`], then [`DataType::Bool`]
//! (strict `true`/`false`), otherwise [`DataType::Utf8`]. Empty cells become [`Value::Null`].

use std::path::Path;

use crate::error::{CleanError, CleanResult};
use crate::types::{Column, DataType, Table, Value};

use super::encodings;
use super::LoadLimits;

/// What to do with a record whose field count differs from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadLinePolicy {
    /// Silently drop the malformed record and continue.
    #[default]
    Drop,
    /// Fail the whole load on the first malformed record; no partial table is produced.
    Fail,
}

/// Options for delimited-text loading.
#[derive(Debug, Clone)]
pub struct DelimitedOptions {
    /// Encoding label resolved through [`encodings::resolve`].
    pub encoding: String,
    /// Malformed-record handling.
    pub bad_lines: BadLinePolicy,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
            bad_lines: BadLinePolicy::default(),
            delimiter: b',',
        }
    }
}

/// Load a delimited file into a [`Table`].
///
/// The first record supplies column names. See the module docs for decoding, bad-line, and
/// type-inference behavior.
pub fn load_delimited_from_path(
    path: impl AsRef<Path>,
    options: &DelimitedOptions,
    limits: &LoadLimits,
) -> CleanResult<Table> {
    let bytes = std::fs::read(path)?;
    limits.check_bytes(bytes.len() as u64)?;

    let encoding = encodings::resolve(&options.encoding)?;
    let (text, _, _) = encoding.decode(&bytes);
    load_delimited_from_str(&text, options, limits)
}

/// Load delimited data from an already decoded string.
pub fn load_delimited_from_str(
    text: &str,
    options: &DelimitedOptions,
    limits: &LoadLimits,
) -> CleanResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        // Width mismatches are checked below so the Drop policy can skip them.
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers =
        super::unique_column_names(rdr.headers()?.iter().map(str::to_string).collect());
    let width = headers.len();

    // Raw cells, column-major; None marks an empty field.
    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => match options.bad_lines {
                BadLinePolicy::Drop => continue,
                BadLinePolicy::Fail => return Err(CleanError::Csv(e)),
            },
        };
        if record.len() != width {
            match options.bad_lines {
                BadLinePolicy::Drop => continue,
                BadLinePolicy::Fail => {
                    let line = record.position().map_or(0, |p| p.line());
                    return Err(CleanError::MalformedRecord {
                        line,
                        message: format!("expected {width} fields, got {}", record.len()),
                    });
                }
            }
        }

        limits.check_rows(raw.first().map_or(0, Vec::len) + 1)?;
        for (idx, field) in record.iter().enumerate() {
            let trimmed = field.trim();
            raw[idx].push(if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            });
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| infer_column(name, cells))
        .collect();
    Ok(Table::new(columns))
}

fn infer_column(name: String, cells: Vec<Option<String>>) -> Column {
    let dtype = infer_dtype(&cells);
    let values = cells
        .into_iter()
        .map(|cell| match cell {
            None => Value::Null,
            Some(s) => typed_value(&s, dtype),
        })
        .collect();
    Column::new(name, dtype, values)
}

fn infer_dtype(cells: &[Option<String>]) -> DataType {
    let non_empty: Vec<&str> = cells.iter().flatten().map(String::as_str).collect();
    if non_empty.is_empty() {
        return DataType::Utf8;
    }
    if non_empty.iter().all(|s| s.parse::<i64>().is_ok()) {
        return DataType::Int64;
    }
    if non_empty.iter().all(|s| s.parse::<f64>().is_ok()) {
        return DataType::Float64;
    }
    // Inference is stricter than directive-driven conversion: only literal true/false.
    if non_empty.iter().all(|s| s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")) {
        return DataType::Bool;
    }
    DataType::Utf8
}

fn typed_value(s: &str, dtype: DataType) -> Value {
    match dtype {
        DataType::Int64 => s.parse().map(Value::Int64).unwrap_or(Value::Null),
        DataType::Float64 => s.parse().map(Value::Float64).unwrap_or(Value::Null),
        DataType::Bool => Value::Bool(s.eq_ignore_ascii_case("true")),
        _ => Value::Utf8(s.to_string()),
    }
}
