use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CopyError, CopyResult};

/// One sheet as produced by a [`WorkbookReader`].
///
/// Each row holds one entry per column, in column order; `None` is an absent value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSheet {
    /// Sheet name as it appears in the source.
    pub name: String,
    /// Column names, in order.
    pub columns: Vec<String>,
    /// Rows aligned to `columns`.
    #[serde(default)]
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawSheet {
    /// Create a raw sheet from already-aligned rows.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Build a raw sheet from a grid of cell values whose first row is the header.
    ///
    /// - Columns stop at the first blank header cell; anything to the right is ignored.
    /// - Data rows are cut or padded to the column count.
    /// - An empty grid yields a sheet with no columns and no rows.
    pub fn from_grid(name: impl Into<String>, grid: Vec<Vec<Option<String>>>) -> Self {
        let mut grid = grid.into_iter();
        let columns: Vec<String> = grid
            .next()
            .unwrap_or_default()
            .into_iter()
            .map_while(|h| h.filter(|h| !h.is_empty()))
            .collect();

        let width = columns.len();
        let rows = grid
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Parse a JSON snapshot: an array of `{ "name", "columns", "rows" }` objects.
    pub fn list_from_json(input: &str) -> CopyResult<Vec<RawSheet>> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CopyError::InvalidSource {
                message: "json snapshot is empty".to_string(),
            });
        }
        Ok(serde_json::from_str(trimmed)?)
    }
}

/// Which sheets a reader should produce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelection {
    /// Every sheet, in workbook order (default).
    #[default]
    All,
    /// Only the listed sheets, in the listed order.
    Only(Vec<String>),
}

impl SheetSelection {
    /// Apply the selection to the names a source offers.
    pub fn resolve(&self, available: &[String]) -> CopyResult<Vec<String>> {
        match self {
            SheetSelection::All => Ok(available.to_vec()),
            SheetSelection::Only(names) => {
                for name in names {
                    if !available.contains(name) {
                        return Err(CopyError::InvalidSource {
                            message: format!(
                                "sheet '{name}' not found. available={available:?}"
                            ),
                        });
                    }
                }
                Ok(names.clone())
            }
        }
    }
}

/// Check that `path` names a file this process can open.
///
/// A path that does not exist is [`CopyError::SourceMissing`]; anything else that stops the file
/// from being opened is [`CopyError::SourceUnreadable`].
pub(crate) fn check_source(path: &Path) -> CopyResult<()> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CopyError::SourceMissing {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(unreadable(path, e)),
    };
    if !meta.is_file() {
        return Err(unreadable(path, "not a regular file"));
    }
    File::open(path).map(drop).map_err(|e| unreadable(path, e))
}

pub(crate) fn unreadable(path: &Path, reason: impl fmt::Display) -> CopyError {
    CopyError::SourceUnreadable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Source of per-sheet column lists and rows.
///
/// Implementors read their source once; [`crate::Copy::from_reader`] turns the result into the
/// navigable model.
pub trait WorkbookReader {
    /// Read the selected sheets, in selection order.
    fn read_sheets(&mut self, selection: &SheetSelection) -> CopyResult<Vec<RawSheet>>;
}

impl WorkbookReader for Vec<RawSheet> {
    fn read_sheets(&mut self, selection: &SheetSelection) -> CopyResult<Vec<RawSheet>> {
        let available: Vec<String> = self.iter().map(|s| s.name.clone()).collect();
        let wanted = selection.resolve(&available)?;
        Ok(wanted
            .iter()
            .filter_map(|name| self.iter().find(|s| &s.name == name).cloned())
            .collect())
    }
}
