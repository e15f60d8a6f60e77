//! `copytext` loads spreadsheet copy (headlines, bylines, lists of terms, ...) into an immutable,
//! navigable in-memory model meant to be consumed by templates.
//!
//! The model is a three-level hierarchy: a [`Copy`] (workbook) maps sheet names to
//! [`model::Sheet`]s, a sheet holds [`model::Row`]s, and a row holds [`model::Cell`]s aligned with
//! the sheet's column names.
//!
//! ## Navigation never fails
//!
//! Every lookup, by position or by name, returns a [`sentinel::Lookup`]. A failed lookup carries a
//! [`sentinel::Sentinel`] whose message is the full path of what was asked for, and any further
//! navigation into a sentinel returns the same sentinel:
//!
//! ```rust
//! use copytext::load::{CopyOptions, RawSheet};
//! use copytext::{Copy, Truthy};
//!
//! # fn main() -> Result<(), copytext::CopyError> {
//! let content = RawSheet::new(
//!     "content",
//!     vec!["key".to_string(), "value".to_string()],
//!     vec![
//!         vec![Some("header_title".to_string()), Some("Across-The-Top Header".to_string())],
//!         vec![Some("nothing".to_string()), None],
//!     ],
//! );
//! let copy = Copy::from_sheets(vec![content], &CopyOptions::default())?;
//!
//! // Rows on a key/value sheet render as their value cell.
//! assert_eq!(copy.get("content").get("header_title").to_string(), "Across-The-Top Header");
//! // A row whose value is empty is falsy.
//! assert!(!copy.get("content").get("nothing").is_truthy());
//! // Failures render as diagnostics instead of panicking.
//! assert_eq!(
//!     copy.get("content").get("header_title").get("foo").to_string(),
//!     "COPY.content.0.foo [column does not exist in sheet]"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Serialization
//!
//! [`Copy::serialize`], [`model::Sheet::serialize`] and [`model::Row::serialize`] produce
//! order-preserving `serde_json::Value`s; `json()` encodes them as text. The shape of each sheet
//! is chosen from its columns (see [`serialize`]).
//!
//! ## Loading
//!
//! [`Copy::open`] reads `.xlsx`/`.xls`/`.ods` workbooks (Cargo feature `excel`, on by default) or
//! a single `.csv` file. Custom sources implement [`load::WorkbookReader`].
//!
//! ## Modules
//!
//! - [`model`]: the copy/sheet/row/cell model
//! - [`sentinel`]: failed-lookup values, the [`sentinel::Lookup`] result type and shared traits
//! - [`serialize`]: shape-aware JSON conversion
//! - [`load`]: readers, load options and load observability
//! - [`error`]: load-time errors

pub mod error;
pub mod load;
pub mod model;
pub mod sentinel;
pub mod serialize;

pub use error::{CopyError, CopyResult};
pub use model::Copy;
pub use sentinel::{Lookup, Render, Sentinel, Truthy};
