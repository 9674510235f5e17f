//! Loading entrypoints and format implementations.
//!
//! Most callers should use [`load_from_path`], which:
//!
//! - auto-detects the format from the file extension (or takes an override via [`LoadOptions`])
//! - enforces the configured [`LoadLimits`] instead of letting memory exhaustion be the
//!   implicit failure mode
//! - optionally reports the outcome to a [`LoadObserver`]
//!
//! Format-specific functions are available under [`delimited`], [`workbook`] (feature `excel`),
//! and [`binary`]. An extension outside the supported set is rejected up front with
//! [`crate::CleanError::UnsupportedExtension`]; a failed load never produces a partial table.

pub mod binary;
pub mod delimited;
pub mod encodings;
pub mod observability;
#[cfg(feature = "excel")]
pub mod workbook;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CleanError, CleanResult};
use crate::types::Table;

pub use delimited::{BadLinePolicy, DelimitedOptions};
pub use encodings::supported_encodings;
pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats,
    StdErrObserver,
};

/// Supported load formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFormat {
    /// Delimited text (`.csv`).
    Delimited,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Workbook,
    /// Binary-serialized [`Table`] (`.bin`, `.pickle`).
    Binary,
}

impl LoadFormat {
    /// Parse a load format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Delimited),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Workbook),
            "bin" | "pickle" => Some(Self::Binary),
            _ => None,
        }
    }
}

/// Upper bounds enforced while loading.
///
/// `None` means unbounded, which matches the original interactive behavior; production callers
/// should set both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadLimits {
    /// Maximum input size in bytes.
    pub max_bytes: Option<u64>,
    /// Maximum number of data rows.
    pub max_rows: Option<usize>,
}

impl LoadLimits {
    pub(crate) fn check_bytes(&self, bytes: u64) -> CleanResult<()> {
        match self.max_bytes {
            Some(max) if bytes > max => Err(CleanError::LimitExceeded {
                message: format!("input is {bytes} bytes, limit is {max}"),
            }),
            _ => Ok(()),
        }
    }

    pub(crate) fn check_rows(&self, rows: usize) -> CleanResult<()> {
        match self.max_rows {
            Some(max) if rows > max => Err(CleanError::LimitExceeded {
                message: format!("input has more than {max} rows"),
            }),
            _ => Ok(()),
        }
    }
}

/// How to choose the sheet when loading a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelection {
    /// Load the first sheet (default).
    #[default]
    First,
    /// Load a single named sheet.
    Named(String),
}

/// Options for workbook loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookOptions {
    /// Which sheet to load.
    pub sheet: SheetSelection,
    /// 1-based header row index; rows above it are discarded.
    pub header_row: usize,
}

impl Default for WorkbookOptions {
    fn default() -> Self {
        Self {
            sheet: SheetSelection::default(),
            header_row: 1,
        }
    }
}

/// Options controlling unified loading.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct LoadOptions {
    /// If `None`, auto-detect format from the file extension.
    pub format: Option<LoadFormat>,
    /// Delimited-text options.
    pub delimited: DelimitedOptions,
    /// Workbook options.
    pub workbook: WorkbookOptions,
    /// Load limits.
    pub limits: LoadLimits,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("delimited", &self.delimited)
            .field("workbook", &self.workbook)
            .field("limits", &self.limits)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// Unified loading entry point.
///
/// - If `options.format` is `None`, the format is inferred from the file extension;
///   an extension outside the supported set is an error, not undefined behavior.
/// - Delimited loads honor `options.delimited` (encoding + bad-line policy); workbook loads
///   honor `options.workbook` (sheet + 1-based header row).
/// - When an observer is configured, the outcome is reported through it, and `on_alert` fires
///   for failures at or above `options.alert_at_or_above`.
///
/// # Examples
///
/// ```no_run
/// use rust_data_cleaning::loading::{load_from_path, LoadOptions};
///
/// # fn main() -> Result<(), rust_data_cleaning::CleanError> {
/// let table = load_from_path("upload.csv", &LoadOptions::default())?;
/// println!("rows={}", table.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> CleanResult<Table> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = LoadContext {
        path: path.to_path_buf(),
        format,
    };

    let result = match format {
        LoadFormat::Delimited => {
            delimited::load_delimited_from_path(path, &options.delimited, &options.limits)
        }
        LoadFormat::Workbook => load_workbook_dispatch(path, options),
        LoadFormat::Binary => binary::load_binary_from_path(path, &options.limits),
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(table) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: table.row_count(),
                    columns: table.column_count(),
                },
            ),
            Err(e) => {
                let severity = severity_for_error(e);
                obs.on_failure(&ctx, severity, e);
                if severity >= options.alert_at_or_above {
                    obs.on_alert(&ctx, severity, e);
                }
            }
        }
    }

    result
}

fn load_workbook_dispatch(path: &Path, options: &LoadOptions) -> CleanResult<Table> {
    // Avoid unused warnings when the feature is off.
    let _ = (path, options);

    #[cfg(feature = "excel")]
    {
        workbook::load_workbook_from_path(path, &options.workbook, &options.limits)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(CleanError::WorkbookDisabled)
    }
}

fn severity_for_error(e: &CleanError) -> LoadSeverity {
    match e {
        CleanError::Io(_) => LoadSeverity::Critical,
        CleanError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        #[cfg(feature = "excel")]
        CleanError::Workbook(_) => LoadSeverity::Error,
        CleanError::LimitExceeded { .. } => LoadSeverity::Warning,
        _ => LoadSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> CleanResult<LoadFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CleanError::UnsupportedExtension {
            extension: format!("<none> ({})", path.display()),
        })?;

    LoadFormat::from_extension(ext).ok_or_else(|| CleanError::UnsupportedExtension {
        extension: ext.to_string(),
    })
}

/// Disambiguate repeated column names by appending `_2`, `_3`, ... to later occurrences.
pub(crate) fn unique_column_names(raw: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        if !out.contains(&name) {
            out.push(name);
            continue;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{name}_{n}");
            if !out.contains(&candidate) {
                out.push(candidate);
                break;
            }
            n += 1;
        }
    }
    out
}
