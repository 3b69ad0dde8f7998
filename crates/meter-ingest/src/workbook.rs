//! Spreadsheet workbook to `DataFrame`.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use meter_common::format_numeric;
use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::table::{collect_rows, text_frame};

/// Renders one cell the way it reads in a delimited export.
///
/// Whole floats lose their fraction so a diameter typed as `15` and stored
/// as `15.0` stays `15`. Error cells read as blank.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) => format_numeric(*v),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(dt) => format_numeric(dt.as_f64()),
    }
}

/// Converts a worksheet range into text rows, one `Vec` per sheet row.
pub fn range_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect()
}

/// Reads the first worksheet of a workbook into a `DataFrame` of text
/// columns, with the same header and blank-row handling as delimited files.
pub fn read_workbook(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut workbook = open_workbook_auto(path).map_err(|source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .unwrap_or_default();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|source| IngestError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    let records = range_rows(&range).into_iter().map(Ok);
    let Some((headers, rows)) = collect_rows(records)? else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    debug!(
        path = %path.display(),
        sheet = %sheet,
        columns = headers.len(),
        rows = rows.len(),
        "inventory workbook parsed"
    );
    text_frame(&headers, rows)
}
