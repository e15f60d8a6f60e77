//! Shape-aware conversion of the model into JSON-ready values.
//!
//! The shape of each sheet depends on its columns:
//!
//! - `key` and `value` columns: an object mapping each row's key to its value
//! - `key` column only: an object mapping each row's key to an object of the other columns
//! - no `key` column: an array of row objects, in row order
//!
//! Objects keep insertion order (serde_json's `preserve_order`), so sheet order, row order and
//! column order survive into the output. When two rows share a key, the later row's value wins
//! but the key keeps the position of its first occurrence.
//!
//! Cells serialize as their raw text; decoration from a [`crate::model::CellWrapper`] only
//! affects rendering.

use serde_json::{Map, Value};

use crate::model::{Copy, Row, Sheet};

/// A row as an object of column name -> cell text, in column order.
pub fn row_to_value(row: &Row) -> Value {
    Value::Object(row_object(row, None))
}

/// A sheet in the shape selected by its columns (see the module docs).
pub fn sheet_to_value(sheet: &Sheet) -> Value {
    match (sheet.has_key_column(), sheet.has_value_column()) {
        (true, true) => {
            let mut obj = Map::new();
            for row in sheet {
                let key = row_key(row);
                let value = row.value().found().map(|c| c.as_str()).unwrap_or_default();
                insert_last_wins(&mut obj, sheet, key, Value::String(value.to_string()));
            }
            Value::Object(obj)
        }
        (true, false) => {
            let mut obj = Map::new();
            for row in sheet {
                let key = row_key(row);
                let nested = Value::Object(row_object(row, Some("key")));
                insert_last_wins(&mut obj, sheet, key, nested);
            }
            Value::Object(obj)
        }
        (false, _) => Value::Array(sheet.iter().map(row_to_value).collect()),
    }
}

/// Every sheet, keyed by sheet name in load order.
pub fn copy_to_value(copy: &Copy) -> Value {
    let obj: Map<String, Value> = copy
        .iter()
        .map(|sheet| (sheet.name().to_string(), sheet_to_value(sheet)))
        .collect();
    Value::Object(obj)
}

fn row_key(row: &Row) -> String {
    row.key().map(|c| c.as_str().to_string()).unwrap_or_default()
}

fn row_object(row: &Row, skip: Option<&str>) -> Map<String, Value> {
    row.entries()
        .filter(|(column, _)| Some(*column) != skip)
        .map(|(column, cell)| (column.to_string(), Value::String(cell.as_str().to_string())))
        .collect()
}

fn insert_last_wins(obj: &mut Map<String, Value>, sheet: &Sheet, key: String, value: Value) {
    if let Some(previous) = obj.insert(key, value) {
        log::warn!(
            "sheet '{}': duplicate key overwrites earlier value {previous}",
            sheet.name()
        );
    }
}
