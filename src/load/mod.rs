//! Loading entrypoints and Workbook Reader implementations.
//!
//! Most callers should use [`load_from_path`] (or [`crate::Copy::open`]), which:
//!
//! - auto-detects the source format by file extension (or you can override via [`CopyOptions`])
//! - runs the matching [`WorkbookReader`] once and builds an immutable [`crate::Copy`]
//! - optionally reports a per-sheet [`LoadReport`] or the failure to a [`LoadObserver`]
//!
//! Readers are also available directly:
//! - [`excel`] (feature `excel`): `.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`
//! - [`csv`]: a single CSV file as a one-sheet copy

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
mod reader;
pub mod unified;

pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadReport, LoadSeverity, LogObserver,
    SheetReport,
};
pub use reader::{RawSheet, SheetSelection, WorkbookReader};
pub use unified::{load_from_path, CopyOptions, LoadFormat};
