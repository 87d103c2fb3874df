//! Row readers for CSV files and workbooks.
//!
//! A reader yields every data row of a source as owned strings. Opening the
//! file is the only fatal step; a row that fails to parse comes back as an
//! `Err` item so the caller can skip it and carry on.
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::io;
use std::path::Path;

use crate::error::IngestError;
use crate::source::{Layout, SourceFormat};

/// One data row, or the reason it could not be read.
pub type RowResult = Result<Vec<String>, String>;

/// Open `path` according to `layout` and return its data rows, header
/// excluded when `layout.has_header` is set.
pub fn read_rows(
    path: &Path,
    layout: &Layout,
) -> Result<Box<dyn Iterator<Item = RowResult>>, IngestError> {
    match layout.format {
        SourceFormat::Csv => read_csv(path, layout.has_header),
        SourceFormat::Xlsx => read_workbook(path, layout.sheet.as_deref(), layout.has_header),
    }
}

/// Fail with `IngestError::Open` unless `path` names a regular file.
/// Directories open without error on some platforms and then read as a
/// single broken row.
fn ensure_regular_file(path: &Path) -> Result<(), IngestError> {
    let open_err = |source: io::Error| IngestError::Open {
        path: path.to_path_buf(),
        source,
    };
    let meta = std::fs::metadata(path).map_err(open_err)?;
    if !meta.is_file() {
        return Err(open_err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    Ok(())
}

fn read_csv(
    path: &Path,
    has_header: bool,
) -> Result<Box<dyn Iterator<Item = RowResult>>, IngestError> {
    ensure_regular_file(path)?;
    let file = std::fs::File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(file);

    Ok(Box::new(reader.into_records().map(|rec| {
        rec.map(|r| r.iter().map(str::to_owned).collect())
            .map_err(|e| e.to_string())
    })))
}

fn read_workbook(
    path: &Path,
    sheet: Option<&str>,
    has_header: bool,
) -> Result<Box<dyn Iterator<Item = RowResult>>, IngestError> {
    let spreadsheet_err = |source: calamine::Error| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    ensure_regular_file(path)?;
    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
    let range = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(IngestError::MissingSheet {
                    path: path.to_path_buf(),
                    sheet: name.to_string(),
                });
            }
            workbook.worksheet_range(name).map_err(spreadsheet_err)?
        }
        None => match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(spreadsheet_err)?,
            None => return Err(IngestError::EmptyWorkbook(path.to_path_buf())),
        },
    };

    let rows = range_rows(&range);
    let skip = usize::from(has_header && !rows.is_empty());
    Ok(Box::new(rows.into_iter().skip(skip).map(Ok)))
}

/// Render a worksheet range as text rows indexed by absolute column, so
/// column 0 is always sheet column A even when the used range starts later.
pub fn range_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    range
        .rows()
        .map(|cells| {
            let mut row = vec![String::new(); offset];
            row.extend(cells.iter().map(cell_text));
            row
        })
        .collect()
}

/// Text content of one cell. ISO dates and durations keep their text (the
/// tokenizer drops their digits); serial dates, errors and empty cells
/// carry no words.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        _ => String::new(),
    }
}
