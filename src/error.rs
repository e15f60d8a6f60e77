use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for load and encoding operations.
pub type CopyResult<T> = Result<T, CopyError>;

/// Hard failures raised while building a [`crate::model::Copy`] or encoding it as JSON.
///
/// Navigation never produces this type: failed lookups yield a [`crate::sentinel::Sentinel`].
#[derive(Debug, Error)]
pub enum CopyError {
    /// The source workbook could not be found.
    #[error(
        "\"{}\" does not exist. Regenerate or download the copy workbook before loading it.",
        .path.display()
    )]
    SourceMissing { path: PathBuf },

    /// The source workbook exists but could not be opened as a workbook (a directory, no read
    /// permission, a corrupt or truncated file).
    #[error(
        "\"{}\" could not be opened ({reason}). Regenerate or download the copy workbook before loading it.",
        .path.display()
    )]
    SourceUnreadable { path: PathBuf, reason: String },

    /// Underlying I/O error (e.g. permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Workbook parsing error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV parsing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding/decoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The reader produced data that cannot form a valid copy (duplicate sheet or column names,
    /// unknown format, ...).
    #[error("invalid source: {message}")]
    InvalidSource { message: String },
}
