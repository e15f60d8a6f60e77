use std::fmt;
use std::slice;
use std::sync::Arc;

use crate::error::CopyResult;
use crate::sentinel::{position, Key, Lookup, Render, Truthy};
use crate::serialize;

use super::cell::Cell;

/// Column layout shared by a sheet and all of its rows.
#[derive(Debug)]
pub(crate) struct Layout {
    /// Qualified sheet path used as the prefix of sentinel messages (`COPY.<sheet>`).
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) columns: Vec<String>,
    pub(crate) key: Option<usize>,
    pub(crate) value: Option<usize>,
}

impl Layout {
    pub(crate) fn new(root: &str, name: &str, columns: Vec<String>) -> Self {
        let key = columns.iter().position(|c| c == "key");
        let value = columns.iter().position(|c| c == "value");
        Self {
            path: format!("{root}.{name}"),
            name: name.to_string(),
            columns,
            key,
            value,
        }
    }

    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// One row of a sheet: cells aligned 1:1 with the sheet's columns.
#[derive(Clone)]
pub struct Row {
    layout: Arc<Layout>,
    index: usize,
    cells: Vec<Cell>,
}

impl Row {
    pub(crate) fn new(layout: Arc<Layout>, index: usize, mut cells: Vec<Cell>) -> Self {
        cells.resize_with(layout.columns.len(), Cell::default);
        Self {
            layout,
            index,
            cells,
        }
    }

    /// Cell by column position or column name.
    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Lookup<&Cell> {
        match key.into() {
            Key::Index(i) => match position(i, self.cells.len()) {
                Some(i) => Lookup::Found(&self.cells[i]),
                None => Lookup::missing_with(format!(
                    "{}.{}.{i} [column index outside range]",
                    self.layout.path, self.index
                )),
            },
            Key::Name(name) => match self.layout.column_index(name) {
                Some(i) => Lookup::Found(&self.cells[i]),
                None => Lookup::missing_with(format!(
                    "{}.{}.{name} [column does not exist in sheet]",
                    self.layout.path, self.index
                )),
            },
        }
    }

    /// The row treated as a scalar: its `value` cell.
    ///
    /// Sheets without a `value` column yield a sentinel named after the row's `key` cell (or its
    /// position when there is no `key` column either).
    pub fn value(&self) -> Lookup<&Cell> {
        match self.layout.value {
            Some(i) => Lookup::Found(&self.cells[i]),
            None => {
                let label = match self.layout.key {
                    Some(k) => self.cells[k].as_str().to_string(),
                    None => self.index.to_string(),
                };
                Lookup::missing_with(format!(
                    "{}.{label} [no value column in sheet]",
                    self.layout.path
                ))
            }
        }
    }

    /// The `key` cell, if the sheet has a `key` column.
    pub fn key(&self) -> Option<&Cell> {
        self.layout.key.map(|i| &self.cells[i])
    }

    /// Position of the row within its sheet.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name of the sheet this row belongs to.
    pub fn sheet_name(&self) -> &str {
        &self.layout.name
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.layout.columns
    }

    /// Cells in column order.
    pub fn iter(&self) -> slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// `(column, cell)` pairs in column order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.layout
            .columns
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the sheet declares no columns, so the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// JSON-ready form of the row (see [`crate::serialize::row_to_value`]).
    pub fn serialize(&self) -> serde_json::Value {
        serialize::row_to_value(self)
    }

    /// The row encoded as JSON text.
    pub fn json(&self) -> CopyResult<String> {
        Ok(serde_json::to_string(&self.serialize())?)
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Cell;
    type IntoIter = slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("sheet", &self.layout.name)
            .field("index", &self.index)
            .field("cells", &self.cells)
            .finish()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value(), f)
    }
}

impl Truthy for Row {
    fn is_truthy(&self) -> bool {
        match self.layout.value {
            Some(i) => !self.cells[i].is_empty(),
            None => true,
        }
    }
}

impl Render for Row {
    fn render(&self) -> String {
        self.value().render()
    }
}

impl<'a> Lookup<&'a Row> {
    /// Continue navigation into a cell.
    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Lookup<&'a Cell> {
        match self {
            Lookup::Found(row) => {
                let row: &'a Row = *row;
                row.get(key)
            }
            Lookup::Missing(s) => Lookup::Missing(s.clone()),
        }
    }

    /// The row's `value` cell, or the propagated sentinel.
    pub fn value(&self) -> Lookup<&'a Cell> {
        match self {
            Lookup::Found(row) => {
                let row: &'a Row = *row;
                row.value()
            }
            Lookup::Missing(s) => Lookup::Missing(s.clone()),
        }
    }

    /// Column count, or `1` for a missing row.
    pub fn len(&self) -> usize {
        match self {
            Lookup::Found(row) => row.len(),
            Lookup::Missing(s) => s.len(),
        }
    }

    /// Never true for a missing row.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells of a found row, or the sentinel once.
    pub fn iter(&self) -> Box<dyn Iterator<Item = Lookup<&'a Cell>> + 'a> {
        match self {
            Lookup::Found(row) => {
                let row: &'a Row = *row;
                Box::new(row.iter().map(Lookup::Found))
            }
            Lookup::Missing(s) => Box::new(std::iter::once(Lookup::Missing(s.clone()))),
        }
    }
}
