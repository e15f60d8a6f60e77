use std::fmt;
use std::sync::Arc;

use crate::sentinel::{Render, Truthy};

/// Text decoration strategy applied to every non-empty cell when a copy is built.
///
/// The wrapper only affects [`Render`] output; equality and serialization keep the raw text.
#[derive(Clone)]
pub struct CellWrapper(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl CellWrapper {
    /// Wrap an arbitrary decoration function.
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Escapes `& < > " '` so cell text can be embedded in HTML as literal text.
    pub fn escape_html() -> Self {
        Self::new(escape_html)
    }

    /// Apply the decoration to `text`.
    pub fn apply(&self, text: &str) -> String {
        (self.0)(text)
    }
}

impl fmt::Debug for CellWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellWrapper(..)")
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// A single textual cell value. Absent values collapse to empty text.
#[derive(Clone, Default)]
pub struct Cell {
    text: String,
    rendered: Option<String>,
}

impl Cell {
    /// Create an undecorated cell from a raw value.
    pub fn new(raw: Option<impl Into<String>>) -> Self {
        Self {
            text: raw.map(Into::into).unwrap_or_default(),
            rendered: None,
        }
    }

    /// Create a cell, decorating non-empty text with `wrapper` if one is given.
    pub fn with_wrapper(raw: Option<impl Into<String>>, wrapper: Option<&CellWrapper>) -> Self {
        let mut cell = Self::new(raw);
        if let Some(w) = wrapper.filter(|_| !cell.text.is_empty()) {
            cell.rendered = Some(w.apply(&cell.text));
        }
        cell
    }

    /// Raw cell text (empty for absent values).
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the cell holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether a decoration was applied at construction time.
    pub fn is_decorated(&self) -> bool {
        self.rendered.is_some()
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cell").field(&self.text).finish()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Cell {}

impl PartialEq<str> for Cell {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Cell {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl AsRef<str> for Cell {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Truthy for Cell {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Render for Cell {
    fn render(&self) -> String {
        self.rendered.clone().unwrap_or_else(|| self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_cells_are_falsy() {
        assert!(Cell::new(Some("Thing")).is_truthy());
        assert!(!Cell::new(Some("")).is_truthy());
        assert!(!Cell::new(None::<String>).is_truthy());
        assert_eq!(Cell::new(None::<String>).as_str(), "");
    }

    #[test]
    fn undecorated_cell_renders_raw_markup() {
        let cell = Cell::new(Some("<strong>Fight me</strong>"));
        assert_eq!(cell.to_string(), "<strong>Fight me</strong>");
        assert_eq!(cell.render(), "<strong>Fight me</strong>");
    }

    #[test]
    fn decoration_changes_rendering_not_equality() {
        let wrapper = CellWrapper::escape_html();
        let plain = Cell::new(Some("a < b"));
        let wrapped = Cell::with_wrapper(Some("a < b"), Some(&wrapper));

        assert!(wrapped.is_decorated());
        assert_eq!(wrapped, plain);
        assert_eq!(wrapped, "a < b");
        assert_eq!(wrapped.render(), "a &lt; b");
    }

    #[test]
    fn empty_cells_are_never_decorated() {
        let wrapper = CellWrapper::new(|s| format!("[{s}]"));
        let cell = Cell::with_wrapper(None::<String>, Some(&wrapper));
        assert!(!cell.is_decorated());
        assert_eq!(cell.render(), "");
    }
}
