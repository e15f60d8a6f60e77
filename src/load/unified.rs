//! Unified load entrypoint.
//!
//! Most callers should use [`load_from_path`] (also available as [`crate::Copy::open`]), which
//! reads a workbook into an immutable [`crate::Copy`].
//!
//! - If [`CopyOptions::format`] is `None`, the format is inferred from the file extension.
//! - If a [`super::observability::LoadObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CopyError, CopyResult};
use crate::model::{CellWrapper, Copy, DEFAULT_ROOT};

use super::csv::CsvReader;
use super::observability::{LoadContext, LoadObserver, LoadReport, LoadSeverity};
use super::reader::{SheetSelection, WorkbookReader};

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFormat {
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
    /// A single comma-separated file.
    Csv,
}

impl LoadFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Options controlling how a copy is loaded and labelled.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct CopyOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<LoadFormat>,
    /// Which sheets to load.
    pub sheets: SheetSelection,
    /// Optional decoration applied to every non-empty cell.
    pub cell_wrapper: Option<CellWrapper>,
    /// Root label prefixed to every sentinel path.
    pub root: String,
    /// Optional observer for load outcomes (see [`super::observability::LogObserver`]).
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for CopyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyOptions")
            .field("format", &self.format)
            .field("sheets", &self.sheets)
            .field("cell_wrapper_set", &self.cell_wrapper.is_some())
            .field("root", &self.root)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheets: SheetSelection::default(),
            cell_wrapper: None,
            root: DEFAULT_ROOT.to_string(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a copy from a workbook on disk.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with a per-sheet [`LoadReport`]
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// A missing source fails with [`CopyError::SourceMissing`] and one that cannot be opened with
/// [`CopyError::SourceUnreadable`]; both are `Critical`.
///
/// # Examples
///
/// ```no_run
/// use copytext::load::{load_from_path, CopyOptions};
/// use copytext::model::CellWrapper;
///
/// # fn main() -> Result<(), copytext::CopyError> {
/// let opts = CopyOptions {
///     cell_wrapper: Some(CellWrapper::escape_html()),
///     ..Default::default()
/// };
/// let copy = load_from_path("data/copy.xlsx", &opts)?;
/// println!("{}", copy.get("content").get("header_title"));
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &CopyOptions) -> CopyResult<Copy> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = LoadContext {
        path: path.to_path_buf(),
        format: fmt,
    };

    let result = match fmt {
        LoadFormat::Excel => load_excel_dispatch(path, options),
        LoadFormat::Csv => {
            CsvReader::open(path).and_then(|mut reader| load_with(&mut reader, options))
        }
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((_, report)) => obs.on_success(&ctx, report),
            Err(e) => {
                let sev = LoadSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(copy, _)| copy)
}

fn load_with(
    reader: &mut dyn WorkbookReader,
    options: &CopyOptions,
) -> CopyResult<(Copy, LoadReport)> {
    Copy::read_with_report(reader, options)
}

fn infer_format_from_path(path: &Path) -> CopyResult<LoadFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CopyError::InvalidSource {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    LoadFormat::from_extension(ext).ok_or_else(|| CopyError::InvalidSource {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

fn load_excel_dispatch(path: &Path, options: &CopyOptions) -> CopyResult<(Copy, LoadReport)> {
    // Avoid unused warnings when the feature is off.
    let _ = (path, options);

    #[cfg(feature = "excel")]
    {
        let mut reader = super::excel::ExcelReader::open(path)?;
        load_with(&mut reader, options)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(CopyError::InvalidSource {
            message: "excel loading not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_from_extension() {
        assert_eq!(LoadFormat::from_extension("XLSX"), Some(LoadFormat::Excel));
        assert_eq!(LoadFormat::from_extension("ods"), Some(LoadFormat::Excel));
        assert_eq!(LoadFormat::from_extension("csv"), Some(LoadFormat::Csv));
        assert_eq!(LoadFormat::from_extension("parquet"), None);
    }

    #[test]
    fn unknown_extension_is_invalid_source() {
        let err = load_from_path("copy.txt", &CopyOptions::default()).unwrap_err();
        assert!(err.to_string().contains("cannot infer format from extension 'txt'"));
    }
}
