use thiserror::Error;

/// Convenience result type for loading, cleaning, and export operations.
pub type CleanResult<T> = Result<T, CleanError>;

/// Error type shared across loading, cleaning, and export.
///
/// Per-column problems inside the cleaning pipeline are *not* errors; they are reported as
/// [`crate::cleaning::Diagnostic`]s so one bad column never aborts the batch. This enum covers
/// the hard failures: unreadable input, malformed files under a fail-fast policy, exceeded load
/// limits, and user-input guards like an empty column selection.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text parse error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    /// Workbook parse error (feature-gated behind `excel`).
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Binary table (de)serialization error.
    #[error("binary table error: {0}")]
    Binary(#[from] bincode::Error),

    /// The binary payload decoded, but the table inside violates the model invariants
    /// (misaligned column lengths or duplicate column names).
    #[error("malformed binary table: {message}")]
    MalformedBinary { message: String },

    /// The file extension maps to no supported format. Callers are expected to reject such
    /// files up front; the loader rejects them too rather than guessing.
    #[error("unsupported file extension '{extension}'")]
    UnsupportedExtension { extension: String },

    /// Workbook loading requested but the `excel` feature is compiled out.
    #[error("workbook loading not enabled (enable cargo feature 'excel')")]
    WorkbookDisabled,

    /// The requested encoding label is not a known text encoding.
    #[error("unknown encoding label '{label}'")]
    UnknownEncoding { label: String },

    /// A record did not match the header width and the bad-line policy is
    /// [`crate::loading::BadLinePolicy::Fail`].
    #[error("malformed record at line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    /// The requested sheet does not exist in the workbook.
    #[error("sheet '{sheet}' not found in workbook")]
    UnknownSheet { sheet: String },

    /// The 1-based header row index falls outside the sheet.
    #[error("header row {header_row} out of range (sheet has {row_count} rows)")]
    HeaderRowOutOfRange { header_row: usize, row_count: usize },

    /// A configured load limit (bytes or rows) was exceeded.
    #[error("load limit exceeded: {message}")]
    LimitExceeded { message: String },

    /// The column projection selected no columns; the whole transform is aborted.
    #[error("column selection is empty; keep at least one column")]
    EmptySelection,

    /// A session operation needs a loaded table and none is present.
    #[error("no table loaded")]
    NoTable,
}
