//! CSV reader: one CSV file becomes a single-sheet copy.

use std::path::{Path, PathBuf};

use crate::error::{CopyError, CopyResult};

use super::reader::{check_source, RawSheet, SheetSelection, WorkbookReader};

/// Reads a CSV file as one sheet named after the file stem (`strings.csv` -> `strings`).
///
/// Rules:
///
/// - The first record is the header; columns stop at the first blank header field.
/// - Records may have differing lengths; short ones are padded with absent values.
/// - Empty fields are absent values.
#[derive(Debug, Clone)]
pub struct CsvReader {
    path: PathBuf,
    sheet_name: String,
}

impl CsvReader {
    /// Prepare to read `path`.
    ///
    /// Fails with [`CopyError::SourceMissing`] if it does not exist and with
    /// [`CopyError::SourceUnreadable`] if it is not a file that can be opened.
    pub fn open(path: impl AsRef<Path>) -> CopyResult<Self> {
        let path = path.as_ref();
        check_source(path)?;
        let sheet_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CopyError::InvalidSource {
                message: format!("cannot derive a sheet name from path ({})", path.display()),
            })?
            .to_string();
        Ok(Self {
            path: path.to_path_buf(),
            sheet_name,
        })
    }

    /// Use `name` as the sheet name instead of the file stem.
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }
}

impl WorkbookReader for CsvReader {
    fn read_sheets(&mut self, selection: &SheetSelection) -> CopyResult<Vec<RawSheet>> {
        let names = selection.resolve(std::slice::from_ref(&self.sheet_name))?;
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;
        Ok(vec![read_csv_sheet(&self.sheet_name, &mut rdr)?])
    }
}

/// Read one sheet from an existing CSV reader (configured without header handling).
pub fn read_csv_sheet<R: std::io::Read>(
    name: &str,
    rdr: &mut csv::Reader<R>,
) -> CopyResult<RawSheet> {
    let mut grid: Vec<Vec<Option<String>>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        grid.push(
            record
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_owned()))
                .collect(),
        );
    }
    Ok(RawSheet::from_grid(name, grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_blank_fields() {
        let input = "key,value,,extra\nbyline,Jane Doe,x,y\nempty,\n";
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input.as_bytes());

        let raw = read_csv_sheet("attribution", &mut rdr).unwrap();
        assert_eq!(raw.columns, ["key", "value"]);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[0][1].as_deref(), Some("Jane Doe"));
        assert_eq!(raw.rows[1][1], None);
    }

    #[test]
    fn directory_is_not_a_csv_source() {
        let err = CsvReader::open("tests/fixtures").unwrap_err();
        assert!(matches!(err, CopyError::SourceUnreadable { .. }));
        assert!(err.to_string().contains("Regenerate or download"));
    }
}
