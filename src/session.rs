//! Session-scoped state.
//!
//! The original interactive shell kept the selected file, task mode, and per-widget choices in
//! ambient global state; here that is an explicit [`Session`] value a UI owns for its lifetime.
//! Single-threaded and synchronous: one user action runs to completion before the next.

use std::path::Path;

use crate::cleaning::{apply_plan, CleaningOutcome, CleaningPlan};
use crate::error::{CleanError, CleanResult};
use crate::export::{self, ExportFormat};
use crate::loading::{load_from_path, LoadOptions};
use crate::profile::{profile, TableProfile};
use crate::types::Table;

/// One user's interactive session: the loaded table plus the choices being edited.
///
/// The table lives exactly as long as the session, or until the next [`Session::load`]
/// replaces it.
#[derive(Debug, Default)]
pub struct Session {
    table: Option<Table>,
    source_name: Option<String>,
    /// Loader configuration used by the next [`Session::load`].
    pub load_options: LoadOptions,
    /// The cleaning choices applied by [`Session::run_plan`].
    pub plan: CleaningPlan,
}

impl Session {
    /// Create an empty session with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a file per [`Self::load_options`], replacing any previously loaded table and
    /// resetting the plan (directives from the old table would be stale).
    pub fn load(&mut self, path: impl AsRef<Path>) -> CleanResult<&Table> {
        let path = path.as_ref();
        let table = load_from_path(path, &self.load_options)?;
        self.source_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string);
        self.plan = CleaningPlan::default();
        Ok(self.table.insert(table))
    }

    /// The currently loaded table, if any.
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// File name of the loaded table's source, if any.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Run [`Self::plan`] over a copy of the loaded table.
    ///
    /// The loaded table is left intact so the plan can be edited and re-run.
    pub fn run_plan(&self) -> CleanResult<CleaningOutcome> {
        let table = self.table.clone().ok_or(CleanError::NoTable)?;
        apply_plan(table, &self.plan)
    }

    /// Run the plan and serialize the cleaned table for download.
    ///
    /// Diagnostics are returned alongside the payload; a user who ignores them may download
    /// partially transformed data, which is the exploratory-tool trade-off.
    pub fn export(&self, format: ExportFormat) -> CleanResult<(Vec<u8>, Vec<crate::cleaning::Diagnostic>)> {
        let outcome = self.run_plan()?;
        let bytes = export::export(&outcome.table, format)?;
        Ok((bytes, outcome.diagnostics))
    }

    /// Profile the loaded table as-is (before cleaning).
    pub fn profile(&self) -> CleanResult<TableProfile> {
        let table = self.table.as_ref().ok_or(CleanError::NoTable)?;
        Ok(profile(table))
    }
}
