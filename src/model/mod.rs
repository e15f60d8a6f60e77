//! The navigable, immutable copy model.
//!
//! A [`Copy`] maps sheet names to [`Sheet`]s; a sheet holds [`Row`]s; a row holds [`Cell`]s
//! aligned with the sheet's columns. All lookups return a [`crate::sentinel::Lookup`].
//!
//! ```rust
//! use copytext::load::{CopyOptions, RawSheet};
//! use copytext::Copy;
//!
//! # fn main() -> Result<(), copytext::CopyError> {
//! let sheet = RawSheet::new(
//!     "attribution",
//!     vec!["key".to_string(), "value".to_string()],
//!     vec![vec![Some("byline".to_string()), Some("Jane Doe".to_string())]],
//! );
//! let copy = Copy::from_sheets(vec![sheet], &CopyOptions::default())?;
//!
//! assert_eq!(copy.get("attribution").get("byline").to_string(), "Jane Doe");
//! assert_eq!(
//!     copy.get("missing").get("byline").get("value").to_string(),
//!     "COPY.missing [sheet does not exist]"
//! );
//! # Ok(())
//! # }
//! ```

mod cell;
mod copy;
mod row;
mod sheet;

pub use cell::{Cell, CellWrapper};
pub use copy::Copy;
pub use row::Row;
pub use sheet::Sheet;

/// Root label prefixed to every sentinel path unless overridden in
/// [`crate::load::CopyOptions::root`].
pub const DEFAULT_ROOT: &str = "COPY";
