//! Per-column type conversion.
//!
//! Conversion is all-or-nothing per column: if any cell refuses the target type, the column is
//! left exactly as it was and one [`Diagnostic`] naming the column and the intended type is
//! emitted. Remaining columns still process. Converting a column already of the target type is
//! a no-op with no diagnostic; nulls pass through every conversion.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::{Column, DataType, Table, Value};

use super::{Diagnostic, TypeDirective};

/// Apply every [`TypeDirective`] to `table`, collecting diagnostics for failures.
pub fn apply_type_directives(
    table: &mut Table,
    directives: &[TypeDirective],
    diagnostics: &mut Vec<Diagnostic>,
) {
    for directive in directives {
        let Some(target) = directive.target else {
            continue;
        };
        let Some(col) = table.column_mut(&directive.column) else {
            diagnostics.push(Diagnostic::new(
                &directive.column,
                "column is no longer present; type directive skipped",
            ));
            continue;
        };
        if col.dtype == target {
            continue;
        }
        if target == DataType::Object {
            // Relabel only; cells keep their current representation.
            col.dtype = DataType::Object;
            continue;
        }
        match convert_column(col, target) {
            Ok(values) => {
                col.values = values;
                col.dtype = target;
            }
            Err(reason) => diagnostics.push(Diagnostic::new(
                &directive.column,
                format!("could not convert to {target}: {reason}"),
            )),
        }
    }
}

fn convert_column(col: &Column, target: DataType) -> Result<Vec<Value>, String> {
    col.values
        .iter()
        .map(|v| convert_value(v, target))
        .collect()
}

fn convert_value(value: &Value, target: DataType) -> Result<Value, String> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    match target {
        DataType::Bool => to_bool(value).map(Value::Bool),
        DataType::Int8 => to_i64(value).and_then(|v| {
            i8::try_from(v)
                .map(Value::Int8)
                .map_err(|_| format!("{v} out of range for int8"))
        }),
        DataType::Int64 => to_i64(value).map(Value::Int64),
        DataType::Float64 => match value {
            Value::Bool(b) => Ok(Value::Float64(if *b { 1.0 } else { 0.0 })),
            Value::Utf8(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float64)
                .map_err(|e| format!("'{s}': {e}")),
            other => other
                .as_f64()
                .map(Value::Float64)
                .ok_or_else(|| format!("'{}' is not numeric", other.render())),
        },
        DataType::DateTime => to_datetime(value).map(Value::DateTime),
        DataType::Time => to_time(value).map(Value::Time),
        DataType::Utf8 => Ok(Value::Utf8(value.render())),
        // Object is handled by the caller as a relabel.
        DataType::Object => Ok(value.clone()),
    }
}

fn to_bool(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Int8(v) => Ok(*v != 0),
        Value::Int64(v) => Ok(*v != 0),
        Value::Float64(v) => Ok(*v != 0.0),
        Value::Utf8(s) => parse_bool_text(s),
        other => Err(format!("'{}' is not a bool", other.render())),
    }
}

fn parse_bool_text(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err(format!("'{s}' is not a bool (true/false/1/0/yes/no)")),
    }
}

fn to_i64(value: &Value) -> Result<i64, String> {
    match value {
        Value::Int8(v) => Ok(i64::from(*v)),
        Value::Int64(v) => Ok(*v),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Float64(v) => {
            if v.fract() != 0.0 {
                Err(format!("'{v}' is not an integer"))
            } else if *v < i64::MIN as f64 || *v >= i64::MAX as f64 {
                // `as` would saturate silently; out-of-range floats fail the column instead.
                Err(format!("'{v}' out of range for int64"))
            } else {
                Ok(*v as i64)
            }
        }
        Value::Utf8(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("'{s}': {e}")),
        other => Err(format!("'{}' is not an integer", other.render())),
    }
}

fn to_datetime(value: &Value) -> Result<NaiveDateTime, String> {
    match value {
        Value::DateTime(dt) => Ok(*dt),
        Value::Utf8(s) => parse_datetime_text(s.trim())
            .ok_or_else(|| format!("'{s}' is not a date-time")),
        other => Err(format!("'{}' is not a date-time", other.render())),
    }
}

fn parse_datetime_text(s: &str) -> Option<NaiveDateTime> {
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    // A bare date counts as midnight.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn to_time(value: &Value) -> Result<NaiveTime, String> {
    match value {
        Value::Time(t) => Ok(*t),
        Value::DateTime(dt) => Ok(dt.time()),
        Value::Utf8(s) => {
            let trimmed = s.trim();
            NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
                .map_err(|_| format!("'{s}' is not a time of day"))
        }
        other => Err(format!("'{}' is not a time of day", other.render())),
    }
}

#[cfg(test)]
mod tests {
    use super::apply_type_directives;
    use crate::cleaning::TypeDirective;
    use crate::types::{Column, DataType, Table, Value};

    fn text_number_table() -> Table {
        Table::new(vec![
            Column::new(
                "n",
                DataType::Utf8,
                vec![
                    Value::Utf8("1".to_string()),
                    Value::Null,
                    Value::Utf8("3".to_string()),
                ],
            ),
            Column::new(
                "label",
                DataType::Utf8,
                vec![
                    Value::Utf8("a".to_string()),
                    Value::Utf8("b".to_string()),
                    Value::Utf8("c".to_string()),
                ],
            ),
        ])
    }

    #[test]
    fn converts_text_to_int_preserving_nulls() {
        let mut table = text_number_table();
        let mut diags = Vec::new();
        apply_type_directives(
            &mut table,
            &[TypeDirective::to("n", DataType::Int64)],
            &mut diags,
        );

        assert!(diags.is_empty());
        let col = table.column("n").unwrap();
        assert_eq!(col.dtype, DataType::Int64);
        assert_eq!(
            col.values,
            vec![Value::Int64(1), Value::Null, Value::Int64(3)]
        );
    }

    #[test]
    fn converting_to_current_type_is_a_silent_noop() {
        let mut table = text_number_table();
        let before = table.clone();
        let mut diags = Vec::new();
        apply_type_directives(
            &mut table,
            &[TypeDirective::to("label", DataType::Utf8)],
            &mut diags,
        );
        assert!(diags.is_empty());
        assert_eq!(table, before);
    }

    #[test]
    fn unconvertible_column_is_untouched_with_one_diagnostic() {
        let mut table = text_number_table();
        let before = table.column("label").unwrap().clone();
        let mut diags = Vec::new();
        apply_type_directives(
            &mut table,
            &[TypeDirective::to("label", DataType::Int64)],
            &mut diags,
        );

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].column, "label");
        assert!(diags[0].message.contains("int64"));
        assert_eq!(table.column("label").unwrap(), &before);
    }

    #[test]
    fn failure_does_not_stop_later_directives() {
        let mut table = text_number_table();
        let mut diags = Vec::new();
        apply_type_directives(
            &mut table,
            &[
                TypeDirective::to("label", DataType::Float64),
                TypeDirective::to("n", DataType::Float64),
            ],
            &mut diags,
        );

        assert_eq!(diags.len(), 1);
        assert_eq!(table.column("n").unwrap().dtype, DataType::Float64);
    }

    #[test]
    fn directive_for_missing_column_is_reported() {
        let mut table = text_number_table();
        let mut diags = Vec::new();
        apply_type_directives(
            &mut table,
            &[TypeDirective::to("gone", DataType::Int64)],
            &mut diags,
        );
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("no longer present"));
    }

    #[test]
    fn object_directive_relabels_without_touching_cells() {
        let mut table = text_number_table();
        let before = table.column("n").unwrap().values.clone();
        let mut diags = Vec::new();
        apply_type_directives(
            &mut table,
            &[TypeDirective::to("n", DataType::Object)],
            &mut diags,
        );
        let col = table.column("n").unwrap();
        assert_eq!(col.dtype, DataType::Object);
        assert_eq!(col.values, before);
        assert!(diags.is_empty());
    }

    #[test]
    fn datetime_and_time_parse_from_text() {
        let mut table = Table::new(vec![
            Column::new(
                "when",
                DataType::Utf8,
                vec![
                    Value::Utf8("2024-01-02 03:04:05".to_string()),
                    Value::Utf8("2024-06-30".to_string()),
                ],
            ),
            Column::new(
                "at",
                DataType::Utf8,
                vec![
                    Value::Utf8("08:30:00".to_string()),
                    Value::Utf8("17:45".to_string()),
                ],
            ),
        ]);
        let mut diags = Vec::new();
        apply_type_directives(
            &mut table,
            &[
                TypeDirective::to("when", DataType::DateTime),
                TypeDirective::to("at", DataType::Time),
            ],
            &mut diags,
        );

        assert!(diags.is_empty());
        assert_eq!(table.column("when").unwrap().dtype, DataType::DateTime);
        assert_eq!(table.column("at").unwrap().dtype, DataType::Time);
        assert_eq!(table.column("when").unwrap().values[1].render(), "2024-06-30 00:00:00");
    }

    #[test]
    fn int64_conversion_rejects_out_of_range_floats() {
        let mut table = Table::new(vec![Column::new(
            "n",
            DataType::Float64,
            vec![Value::Float64(5.0), Value::Float64(1e300)],
        )]);
        let before = table.clone();
        let mut diags = Vec::new();
        apply_type_directives(
            &mut table,
            &[TypeDirective::to("n", DataType::Int64)],
            &mut diags,
        );

        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("out of range"));
        assert_eq!(table, before);
    }

    #[test]
    fn int8_conversion_range_checks() {
        let mut table = Table::new(vec![Column::new(
            "n",
            DataType::Int64,
            vec![Value::Int64(5), Value::Int64(300)],
        )]);
        let before = table.clone();
        let mut diags = Vec::new();
        apply_type_directives(
            &mut table,
            &[TypeDirective::to("n", DataType::Int8)],
            &mut diags,
        );

        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("out of range"));
        assert_eq!(table, before);
    }
}
