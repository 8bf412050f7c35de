//! Error types for kwnorm
//!
//! Normalization itself never fails. Everything that can go wrong lives at
//! the boundary: locating the data source, selecting a sheet or column, and
//! reading or writing the table.

use std::path::PathBuf;

use thiserror::Error;

/// kwnorm error types
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The data source path does not exist
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The file extension is not a known workbook or CSV format
    #[error("Unsupported source format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The source has no header row
    #[error("Source is empty: {}", .0.display())]
    EmptySource(PathBuf),

    /// A worksheet was named that the workbook does not contain
    #[error("Sheet '{sheet}' not found (available: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    /// The keyword column is not part of the header row
    #[error("Column '{column}' not found (available: {})", .available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// Failure while decoding the source
    #[error("Failed to read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    /// Failure while writing the annotated table
    #[error("Failed to write {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },
}

impl Error {
    /// True for selection errors the user can fix by naming another sheet or
    /// column, as opposed to a missing or unreadable source.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Error::SheetNotFound { .. } | Error::ColumnNotFound { .. }
        )
    }

    /// Names the user can pick from, for schema errors.
    pub fn available(&self) -> &[String] {
        match self {
            Error::SheetNotFound { available, .. } | Error::ColumnNotFound { available, .. } => {
                available
            }
            _ => &[],
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Read {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for kwnorm operations
pub type Result<T> = std::result::Result<T, Error>;
