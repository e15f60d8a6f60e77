#![cfg(feature = "excel")]

//! Workbook reader backed by `calamine` (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader, Sheets};

use crate::error::CopyResult;

use super::reader::{check_source, unreadable, RawSheet, SheetSelection, WorkbookReader};

/// Reads every selected worksheet of a workbook into [`RawSheet`]s.
///
/// Behavior:
/// - The first row of each sheet's used range is the header row
/// - Columns stop at the first blank header cell
/// - Cells are converted to text (see [`cell_to_text`]); empty cells are absent values
pub struct ExcelReader {
    workbook: Sheets<BufReader<File>>,
}

impl ExcelReader {
    /// Open a workbook.
    ///
    /// Fails with [`CopyError::SourceMissing`] if the path does not exist, and with
    /// [`CopyError::SourceUnreadable`] if it cannot be opened as a workbook.
    ///
    /// [`CopyError::SourceMissing`]: crate::CopyError::SourceMissing
    /// [`CopyError::SourceUnreadable`]: crate::CopyError::SourceUnreadable
    pub fn open(path: impl AsRef<Path>) -> CopyResult<Self> {
        let path = path.as_ref();
        check_source(path)?;
        let workbook = open_workbook_auto(path).map_err(|e| unreadable(path, e))?;
        Ok(Self { workbook })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }
}

impl WorkbookReader for ExcelReader {
    fn read_sheets(&mut self, selection: &SheetSelection) -> CopyResult<Vec<RawSheet>> {
        let sheets = selection.resolve(&self.sheet_names())?;

        let mut out = Vec::with_capacity(sheets.len());
        for sheet in sheets {
            let range = self.workbook.worksheet_range(&sheet)?;
            out.push(sheet_from_range(&sheet, &range));
        }
        Ok(out)
    }
}

fn sheet_from_range(sheet: &str, range: &calamine::Range<Data>) -> RawSheet {
    let grid = range
        .rows()
        .map(|row| row.iter().map(cell_to_text).collect())
        .collect();
    RawSheet::from_grid(sheet, grid)
}

/// Convert a workbook cell into copy text.
///
/// Strings pass through verbatim, whole floats drop their `.0`, date and time cells are written
/// out as text (see [`datetime_to_text`]), and everything else uses its display form. Empty cells
/// are absent.
pub fn cell_to_text(c: &Data) -> Option<String> {
    match c {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(datetime_to_text(dt)),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(format!("{e:?}")),
        other => Some(other.to_string()),
    }
}

/// Render a date/time cell the way a datetime prints, not as its serial number.
///
/// - dates: `2013-01-22 00:00:00`
/// - times of day (serial below one day): `03:37:00`
/// - durations (`[h]:mm:ss` formats): total hours, `27:30:00`
///
/// Milliseconds are appended only when present.
pub fn datetime_to_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        let serial = dt.as_f64();
        let secs = (serial.abs() * 86_400.0).round() as u64;
        let sign = if serial < 0.0 { "-" } else { "" };
        return format!(
            "{sign}{}:{:02}:{:02}",
            secs / 3600,
            secs % 3600 / 60,
            secs % 60
        );
    }

    let (year, month, day, hour, min, sec, milli) = dt.to_ymd_hms_milli();
    let mut time = format!("{hour:02}:{min:02}:{sec:02}");
    if milli > 0 {
        time.push_str(&format!(".{milli:03}"));
    }
    if dt.as_f64() < 1.0 {
        time
    } else {
        format!("{year:04}-{month:02}-{day:02} {time}")
    }
}
