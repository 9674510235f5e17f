//! The cleaning pipeline.
//!
//! A [`CleaningPlan`] captures the user's per-session choices; [`apply_plan`] runs them over a
//! [`Table`] in a fixed order:
//!
//! 1. random row sampling ([`shape::sample_rows`])
//! 2. column projection ([`shape::project_columns`]) — an empty selection aborts the whole plan
//! 3. per-column type conversion ([`convert::apply_type_directives`])
//! 4. per-column null handling ([`nulls::apply_null_directives`])
//! 5. duplicate removal ([`dedup::apply_duplicate_policy`])
//! 6. multi-key sort ([`shape::sort_rows`])
//!
//! Per-column problems never abort the batch: the affected column is left as it was and a
//! [`Diagnostic`] naming it is collected into the [`CleaningOutcome`]. All directives are keyed
//! by column *name* and re-resolved when each stage runs, so a directive for a column that an
//! earlier stage dropped is reported, never silently applied to a different column.

pub mod convert;
pub mod dedup;
pub mod nulls;
pub mod shape;

use std::fmt;

use crate::error::CleanResult;
use crate::types::{DataType, Table};

pub use dedup::DuplicatePolicy;
pub use nulls::NullPolicy;

/// A non-fatal, user-visible message about a per-column operation that did not apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the column the directive targeted.
    pub column: String,
    /// What went wrong, in user-facing terms.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic for `column`.
    pub fn new(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column '{}': {}", self.column, self.message)
    }
}

/// Random row sampling settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSpec {
    /// Percent of rows to keep, 1..=100. 100 is a strict no-op.
    pub percent: u8,
    /// Optional RNG seed for reproducible samples. `None` draws from entropy, so repeated
    /// invocations may keep different rows (acceptable for an exploratory tool).
    pub seed: Option<u64>,
}

impl Default for SampleSpec {
    fn default() -> Self {
        Self {
            percent: 100,
            seed: None,
        }
    }
}

/// Pairing of a column name with a target type. `target: None` is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDirective {
    /// Column the directive targets, resolved by name at application time.
    pub column: String,
    /// Target type, or `None` to leave the column untouched.
    pub target: Option<DataType>,
}

impl TypeDirective {
    /// Convert `column` to `target`.
    pub fn to(column: impl Into<String>, target: DataType) -> Self {
        Self {
            column: column.into(),
            target: Some(target),
        }
    }
}

/// Pairing of a column name with a null policy.
#[derive(Debug, Clone, PartialEq)]
pub struct NullDirective {
    /// Column the directive targets, resolved by name at application time.
    pub column: String,
    /// What to do with the column's missing values.
    pub policy: NullPolicy,
}

impl NullDirective {
    /// Apply `policy` to `column`.
    pub fn new(column: impl Into<String>, policy: NullPolicy) -> Self {
        Self {
            column: column.into(),
            policy,
        }
    }
}

/// One key of a multi-key sort; sequence order in the plan is precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Column to sort by.
    pub column: String,
    /// Sort direction. Nulls order last either way.
    pub descending: bool,
}

impl SortKey {
    /// Ascending sort on `column`.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    /// Descending sort on `column`.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// The user's per-session cleaning choices, applied by [`apply_plan`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleaningPlan {
    /// Row sampling (stage 1).
    pub sample: SampleSpec,
    /// Column projection (stage 2): subset and order to keep. `None` keeps every column;
    /// `Some` with an empty list aborts the plan with
    /// [`crate::CleanError::EmptySelection`].
    pub keep_columns: Option<Vec<String>>,
    /// Per-column type conversion (stage 3).
    pub types: Vec<TypeDirective>,
    /// Per-column null handling (stage 4), applied in declared order.
    pub nulls: Vec<NullDirective>,
    /// Duplicate-row handling (stage 5).
    pub duplicates: DuplicatePolicy,
    /// Multi-key sort (stage 6), applied last.
    pub sort: Vec<SortKey>,
}

/// The cleaned table plus every diagnostic collected along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOutcome {
    /// The table after all stages ran.
    pub table: Table,
    /// Per-column diagnostics, in emission order. Empty means every directive applied.
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the full pipeline over `table`.
///
/// The only hard failure is an empty column selection; every per-column problem degrades to a
/// [`Diagnostic`] in the outcome. See the module docs for stage order.
pub fn apply_plan(mut table: Table, plan: &CleaningPlan) -> CleanResult<CleaningOutcome> {
    let mut diagnostics = Vec::new();

    shape::sample_rows(&mut table, &plan.sample);
    if let Some(keep) = &plan.keep_columns {
        shape::project_columns(&mut table, keep, &mut diagnostics)?;
    }
    convert::apply_type_directives(&mut table, &plan.types, &mut diagnostics);
    nulls::apply_null_directives(&mut table, &plan.nulls, &mut diagnostics);
    dedup::apply_duplicate_policy(&mut table, plan.duplicates);
    shape::sort_rows(&mut table, &plan.sort, &mut diagnostics);

    Ok(CleaningOutcome { table, diagnostics })
}
