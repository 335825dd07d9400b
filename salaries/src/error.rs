//! Error types for the salary dataset tool.
//!
//! Errors are layered the same way the data flows:
//!
//! - [`RowError`] - why a single data row was rejected
//! - [`DatasetError`] - loading or writing a whole dataset file
//! - [`ReferenceError`] - bundled country/currency tables
//! - [`QueryError`] - report queries over a loaded dataset
//! - [`SessionError`] - top-level error seen by the interactive menu
//!
//! Conversions are provided via `From` so `?` works across layers.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Row Errors
// =============================================================================

/// Reason a data row failed validation.
///
/// Never shown to the end user directly; it is kept as the `source` of
/// [`DatasetError::MalformedRow`] for logs and tests.
#[derive(Debug, Error)]
pub enum RowError {
    /// Wrong number of fields after splitting on the delimiter.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// Country code missing from the country reference table.
    #[error("unknown country code '{value}' in column '{column}'")]
    UnknownCountry { column: &'static str, value: String },

    /// Currency code missing from the currency reference table.
    #[error("unknown currency code '{0}'")]
    UnknownCurrency(String),

    /// Text does not name a variant of the column's enumeration.
    #[error("unknown tag '{value}' in column '{column}'")]
    UnknownTag { column: &'static str, value: String },

    /// Integer column did not parse as base-10.
    #[error("invalid integer '{value}' in column '{column}'")]
    InvalidInteger {
        column: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

// =============================================================================
// Dataset Errors
// =============================================================================

/// Errors while reading or writing a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Path does not carry the `.csv` extension.
    #[error("Invalid file name '{}': a .csv extension is required", .0.display())]
    InvalidFilename(PathBuf),

    /// Path does not resolve to an existing file.
    #[error("File '{}' does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// First line differs from the expected column headers.
    #[error("Invalid headers in file")]
    InvalidHeader,

    /// A data row failed parsing or validation.
    #[error("Malformed data at line {line}")]
    MalformedRow {
        line: u64,
        #[source]
        cause: RowError,
    },

    /// Header was valid but no data rows followed.
    #[error("File contains no data")]
    EmptyDataset,

    /// File is locked by another process.
    #[error("File '{}' is in use by another process, close it and retry", .0.display())]
    FileBusy(PathBuf),

    /// Any other IO failure.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Low-level CSV failure (invalid UTF-8, broken quoting, ...).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl DatasetError {
    /// Build the error for a failed open/create, detecting file locks.
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        if is_busy(&err) {
            Self::FileBusy(path.into())
        } else {
            Self::Io(err)
        }
    }

    /// Line number of a rejected row, if this is a row error.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MalformedRow { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Windows reports sharing (32) and lock (33) violations as raw OS errors.
fn is_busy(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::ResourceBusy {
        return true;
    }
    cfg!(windows) && matches!(err.raw_os_error(), Some(32) | Some(33))
}

// =============================================================================
// Reference Data Errors
// =============================================================================

/// Errors while parsing the country or currency tables.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// Table could not be read as CSV.
    #[error("Failed to read {table} table: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    /// Table parsed but yielded no codes.
    #[error("{0} table is empty")]
    Empty(&'static str),
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors from report queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A report was requested before any dataset was loaded.
    #[error("Load a file first")]
    NoDatasetLoaded,

    /// Aggregate requested over a subset with no records.
    #[error("No records for {0}")]
    EmptySubset(String),
}

// =============================================================================
// Session Errors (top-level)
// =============================================================================

/// Top-level error surfaced by the menu.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Loading or writing failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// A report query failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Command is not in the menu.
    #[error("Unknown command '{0}', try again")]
    UnknownCommand(String),

    /// Console input ended while a prompt was waiting.
    #[error("Input closed")]
    InputClosed,

    /// Console read/write failed.
    #[error("Console error: {0}")]
    Console(#[from] io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Result type for reference table loading.
pub type ReferenceResult<T> = Result<T, ReferenceError>;

/// Result type for report queries.
pub type QueryResult<T> = Result<T, QueryError>;

/// Result type for menu and session operations.
pub type SessionResult<T> = Result<T, SessionError>;
