use std::fmt;
use std::slice;
use std::sync::Arc;

use crate::error::CopyResult;
use crate::sentinel::{position, Key, Lookup, Truthy};
use crate::serialize;

use super::cell::{Cell, CellWrapper};
use super::row::{Layout, Row};
use super::DEFAULT_ROOT;

/// A single worksheet: its column names and its rows, in source order.
#[derive(Clone)]
pub struct Sheet {
    layout: Arc<Layout>,
    rows: Vec<Row>,
}

impl Sheet {
    /// Build a standalone sheet under the default `COPY` root, without cell decoration.
    ///
    /// Each raw row is aligned to `columns` (missing trailing values become empty cells,
    /// extra values are dropped).
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Self {
        Self::build(DEFAULT_ROOT, &name.into(), columns, rows, None)
    }

    pub(crate) fn build(
        root: &str,
        name: &str,
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
        wrapper: Option<&CellWrapper>,
    ) -> Self {
        let layout = Arc::new(Layout::new(root, name, columns));
        let width = layout.columns.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                let cells = raw
                    .into_iter()
                    .take(width)
                    .map(|v| Cell::with_wrapper(v, wrapper))
                    .collect();
                Row::new(Arc::clone(&layout), i, cells)
            })
            .collect();
        Self { layout, rows }
    }

    /// Row by position, or by the value of its `key` cell.
    ///
    /// Key lookup scans rows in order and returns the first match.
    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Lookup<&Row> {
        match key.into() {
            Key::Index(i) => match position(i, self.rows.len()) {
                Some(i) => Lookup::Found(&self.rows[i]),
                None => Lookup::missing_with(format!(
                    "{}.{i} [row index outside range]",
                    self.layout.path
                )),
            },
            Key::Name(name) => {
                if self.layout.key.is_none() {
                    return Lookup::missing_with(format!(
                        "{}.{name} [no key column in sheet]",
                        self.layout.path
                    ));
                }
                self.rows
                    .iter()
                    .find(|row| row.key().is_some_and(|c| c == name))
                    .map_or_else(
                        || {
                            Lookup::missing_with(format!(
                                "{}.{name} [key does not exist in sheet]",
                                self.layout.path
                            ))
                        },
                        Lookup::Found,
                    )
            }
        }
    }

    /// Sheet name as it appears in the workbook.
    pub fn name(&self) -> &str {
        &self.layout.name
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.layout.columns
    }

    /// Whether the sheet declares a `key` column.
    pub fn has_key_column(&self) -> bool {
        self.layout.key.is_some()
    }

    /// Whether the sheet declares a `value` column.
    pub fn has_value_column(&self) -> bool {
        self.layout.value.is_some()
    }

    /// Rows in source order.
    pub fn iter(&self) -> slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the sheet has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// JSON-ready form of the sheet (see [`crate::serialize::sheet_to_value`]).
    pub fn serialize(&self) -> serde_json::Value {
        serialize::sheet_to_value(self)
    }

    /// The sheet encoded as JSON text.
    pub fn json(&self) -> CopyResult<String> {
        Ok(serde_json::to_string(&self.serialize())?)
    }
}

impl<'a> IntoIterator for &'a Sheet {
    type Item = &'a Row;
    type IntoIter = slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sheet")
            .field("name", &self.layout.name)
            .field("columns", &self.layout.columns)
            .field("rows", &self.rows.len())
            .finish()
    }
}

impl Truthy for Sheet {
    fn is_truthy(&self) -> bool {
        !self.rows.is_empty()
    }
}

impl<'a> Lookup<&'a Sheet> {
    /// Continue navigation into a row.
    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Lookup<&'a Row> {
        match self {
            Lookup::Found(sheet) => {
                let sheet: &'a Sheet = *sheet;
                sheet.get(key)
            }
            Lookup::Missing(s) => Lookup::Missing(s.clone()),
        }
    }

    /// Row count, or `1` for a missing sheet.
    pub fn len(&self) -> usize {
        match self {
            Lookup::Found(sheet) => sheet.len(),
            Lookup::Missing(s) => s.len(),
        }
    }

    /// Whether a found sheet has no rows; never true for a missing sheet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows of a found sheet, or the sentinel once.
    pub fn iter(&self) -> Box<dyn Iterator<Item = Lookup<&'a Row>> + 'a> {
        match self {
            Lookup::Found(sheet) => {
                let sheet: &'a Sheet = *sheet;
                Box::new(sheet.iter().map(Lookup::Found))
            }
            Lookup::Missing(s) => Box::new(std::iter::once(Lookup::Missing(s.clone()))),
        }
    }
}
