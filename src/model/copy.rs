use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{CopyError, CopyResult};
use crate::load::{self, CopyOptions, LoadReport, RawSheet, SheetReport, WorkbookReader};
use crate::sentinel::Lookup;
use crate::serialize;

use super::sheet::Sheet;

/// Workbook-level model: sheet name -> [`Sheet`], in load order.
///
/// Built once from a Workbook Reader's output and immutable afterwards, so a single instance can
/// be shared across threads without locking.
#[derive(Clone)]
pub struct Copy {
    root: String,
    sheets: IndexMap<String, Sheet>,
}

impl Copy {
    /// Load a workbook from disk (see [`crate::load::load_from_path`]).
    pub fn open(path: impl AsRef<Path>, options: &CopyOptions) -> CopyResult<Self> {
        load::load_from_path(path, options)
    }

    /// Build a copy by running `reader` once.
    pub fn from_reader<R: WorkbookReader + ?Sized>(
        reader: &mut R,
        options: &CopyOptions,
    ) -> CopyResult<Self> {
        Self::read_with_report(reader, options).map(|(copy, _)| copy)
    }

    /// Build a copy from already-read sheets.
    ///
    /// Each row is cut to the declared columns first; rows whose remaining cells are all absent
    /// are then skipped. Duplicate sheet names or duplicate column names within a sheet are
    /// rejected.
    pub fn from_sheets(sheets: Vec<RawSheet>, options: &CopyOptions) -> CopyResult<Self> {
        Self::assemble(sheets, options).map(|(copy, _)| copy)
    }

    pub(crate) fn read_with_report<R: WorkbookReader + ?Sized>(
        reader: &mut R,
        options: &CopyOptions,
    ) -> CopyResult<(Self, LoadReport)> {
        let sheets = reader.read_sheets(&options.sheets)?;
        Self::assemble(sheets, options)
    }

    fn assemble(sheets: Vec<RawSheet>, options: &CopyOptions) -> CopyResult<(Self, LoadReport)> {
        let mut out: IndexMap<String, Sheet> = IndexMap::with_capacity(sheets.len());
        let mut report = LoadReport::default();

        for raw in sheets {
            if out.contains_key(&raw.name) {
                return Err(CopyError::InvalidSource {
                    message: format!("duplicate sheet name '{}'", raw.name),
                });
            }
            check_unique_columns(&raw)?;

            let width = raw.columns.len();
            let total = raw.rows.len();
            let rows: Vec<Vec<Option<String>>> = raw
                .rows
                .into_iter()
                .map(|mut row| {
                    row.truncate(width);
                    row
                })
                .filter(|row| row.iter().any(Option::is_some))
                .collect();
            let skipped = total - rows.len();
            if skipped > 0 {
                log::debug!("sheet '{}': skipped {skipped} empty row(s)", raw.name);
            }

            let sheet = Sheet::build(
                &options.root,
                &raw.name,
                raw.columns,
                rows,
                options.cell_wrapper.as_ref(),
            );
            report.sheets.push(SheetReport {
                name: raw.name.clone(),
                columns: width,
                rows: sheet.len(),
                skipped_rows: skipped,
            });
            out.insert(raw.name, sheet);
        }

        let copy = Self {
            root: options.root.clone(),
            sheets: out,
        };
        Ok((copy, report))
    }

    /// Sheet by exact name.
    pub fn get(&self, name: &str) -> Lookup<&Sheet> {
        match self.sheets.get(name) {
            Some(sheet) => Lookup::Found(sheet),
            None => Lookup::missing_with(format!("{}.{name} [sheet does not exist]", self.root)),
        }
    }

    /// Root label used in sentinel paths.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Sheet names in load order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    /// Sheets in load order.
    pub fn iter(&self) -> indexmap::map::Values<'_, String, Sheet> {
        self.sheets.values()
    }

    /// Number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Whether no sheets were loaded.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Total number of rows across all sheets.
    pub fn row_count(&self) -> usize {
        self.sheets.values().map(Sheet::len).sum()
    }

    /// JSON-ready form of every sheet (see [`crate::serialize::copy_to_value`]).
    pub fn serialize(&self) -> serde_json::Value {
        serialize::copy_to_value(self)
    }

    /// The whole copy encoded as JSON text.
    pub fn json(&self) -> CopyResult<String> {
        Ok(serde_json::to_string(&self.serialize())?)
    }
}

fn check_unique_columns(raw: &RawSheet) -> CopyResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(raw.columns.len());
    for c in &raw.columns {
        if !seen.insert(c.as_str()) {
            return Err(CopyError::InvalidSource {
                message: format!("sheet '{}': duplicate column '{c}'", raw.name),
            });
        }
    }
    Ok(())
}

impl<'a> IntoIterator for &'a Copy {
    type Item = &'a Sheet;
    type IntoIter = indexmap::map::Values<'a, String, Sheet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Copy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Copy")
            .field("root", &self.root)
            .field("sheets", &self.sheets.keys().collect::<Vec<_>>())
            .finish()
    }
}
