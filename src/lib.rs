//! `rust-data-cleaning` is a small library for ad-hoc cleaning of tabular files: load a file
//! into an in-memory [`types::Table`], apply a short pipeline of corrections, and export the
//! result as bytes for download.
//!
//! The primary entrypoints are [`loading::load_from_path`] (auto-detects the format from the
//! file extension, or takes an override via [`loading::LoadOptions`]) and
//! [`cleaning::apply_plan`] (runs a [`cleaning::CleaningPlan`] over a table).
//!
//! ## What you can load
//!
//! - **Delimited text**: `.csv`, with a caller-chosen encoding and bad-line policy
//! - **Workbooks** (requires the Cargo feature `excel`, on by default): `.xlsx`, `.xls`,
//!   `.xlsm`, `.xlsb`, `.ods`, with a sheet selection and 1-based header row
//! - **Binary tables**: `.bin` / `.pickle`, the `bincode` form written by
//!   [`export::to_binary_bytes`]
//!
//! ## What the pipeline does
//!
//! In fixed order: random row sampling, column projection (an empty selection aborts), per
//! column type conversion, per-column null handling, duplicate removal, multi-key sort.
//! Per-column failures never abort the batch; they surface as [`cleaning::Diagnostic`]s in the
//! [`cleaning::CleaningOutcome`]. All per-column directives are keyed by column name and
//! re-resolved when the stage runs.
//!
//! ## Quick example
//!
//! ```rust
//! use rust_data_cleaning::cleaning::{
//!     apply_plan, CleaningPlan, DuplicatePolicy, NullDirective, NullPolicy, SortKey,
//!     TypeDirective,
//! };
//! use rust_data_cleaning::export::to_delimited_bytes;
//! use rust_data_cleaning::types::{Column, DataType, Table, Value};
//!
//! # fn main() -> Result<(), rust_data_cleaning::CleanError> {
//! let table = Table::new(vec![
//!     Column::new("id", DataType::Utf8, vec![
//!         Value::Utf8("2".to_string()),
//!         Value::Utf8("1".to_string()),
//!         Value::Utf8("1".to_string()),
//!     ]),
//!     Column::new("score", DataType::Float64, vec![
//!         Value::Float64(8.5),
//!         Value::Null,
//!         Value::Null,
//!     ]),
//! ]);
//!
//! let plan = CleaningPlan {
//!     types: vec![TypeDirective::to("id", DataType::Int64)],
//!     nulls: vec![NullDirective::new("score", NullPolicy::FillZero)],
//!     duplicates: DuplicatePolicy::KeepFirst,
//!     sort: vec![SortKey::asc("id")],
//!     ..Default::default()
//! };
//!
//! let outcome = apply_plan(table, &plan)?;
//! assert!(outcome.diagnostics.is_empty());
//! assert_eq!(outcome.table.row_count(), 2);
//! let bytes = to_delimited_bytes(&outcome.table)?;
//! assert_eq!(String::from_utf8(bytes).unwrap(), "id,score\n1,0\n2,8.5\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`loading`]: unified loading entrypoints and format-specific implementations
//! - [`types`]: the in-memory table model
//! - [`cleaning`]: the directive-driven cleaning pipeline
//! - [`export`]: delimited and binary serialization for download
//! - [`profile`]: lightweight statistical summaries
//! - [`session`]: explicit session-scoped state for an interactive shell
//! - [`error`]: error types used across the crate

pub mod cleaning;
pub mod error;
pub mod export;
pub mod loading;
pub mod profile;
pub mod session;
pub mod types;

pub use error::{CleanError, CleanResult};
