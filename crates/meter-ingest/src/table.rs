//! Delimited text to `DataFrame`.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame};
use tracing::debug;

use crate::delimiter::sniff_delimiter;
use crate::encoding::decode_bytes;
use crate::error::{IngestError, Result};
use crate::workbook::read_workbook;

const WORKBOOK_EXTENSIONS: [&str; 3] = ["xlsx", "xlsm", "xls"];

/// Options controlling how an inventory file is read.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Field delimiter; sniffed from the file when `None`.
    pub delimiter: Option<u8>,
}

impl IngestOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
}

/// Raw text table: one header row, rows padded to the header width.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub delimiter: u8,
}

impl CsvTable {
    /// Converts the table into a `DataFrame` of text columns.
    pub fn into_dataframe(self) -> Result<DataFrame> {
        text_frame(&self.headers, self.rows)
    }
}

/// Builds a `DataFrame` of text columns from rows already padded to the
/// header width.
pub(crate) fn text_frame(headers: &[String], rows: Vec<Vec<String>>) -> Result<DataFrame> {
    let mut values: Vec<Vec<String>> = vec![Vec::with_capacity(rows.len()); headers.len()];
    for row in rows {
        for (idx, cell) in row.into_iter().enumerate() {
            values[idx].push(cell);
        }
    }
    let columns: Vec<Column> = headers
        .iter()
        .zip(values)
        .map(|(name, cells)| Column::new(name.as_str().into(), cells))
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Names blank headers and suffixes repeated ones so every column is unique.
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    raw.into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = if header.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                header
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Splits raw records into a header row and data rows.
///
/// The first non-blank record is the header row; blank records are skipped
/// and short rows are padded with empty cells.
pub(crate) fn collect_rows<I>(records: I) -> Result<Option<(Vec<String>, Vec<Vec<String>>)>>
where
    I: IntoIterator<Item = Result<Vec<String>>>,
{
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let cells: Vec<String> = record.iter().map(|raw| normalize_cell(raw)).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        match &headers {
            None => {
                headers = Some(unique_headers(
                    record.iter().map(|raw| normalize_header(raw)).collect(),
                ));
            }
            Some(header_row) => {
                let mut row = Vec::with_capacity(header_row.len());
                for idx in 0..header_row.len() {
                    row.push(cells.get(idx).cloned().unwrap_or_default());
                }
                rows.push(row);
            }
        }
    }
    Ok(headers.map(|headers| (headers, rows)))
}

/// Parses delimited text into a [`CsvTable`].
pub fn parse_csv_text(text: &str, delimiter: u8, path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let records = reader.records().map(|record| {
        record
            .map(|record| record.iter().map(str::to_string).collect::<Vec<_>>())
            .map_err(|source| IngestError::CsvParse {
                path: path.to_path_buf(),
                source,
            })
    });
    let Some((headers, rows)) = collect_rows(records)? else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    Ok(CsvTable {
        headers,
        rows,
        delimiter,
    })
}

/// Reads an inventory file into a [`CsvTable`].
pub fn read_csv_table(path: &Path, options: &IngestOptions) -> Result<CsvTable> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let (text, encoding) = decode_bytes(&bytes, path)?;
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| sniff_delimiter(&text));
    let table = parse_csv_text(&text, delimiter, path)?;
    debug!(
        path = %path.display(),
        ?encoding,
        delimiter = %char::from(delimiter).escape_default(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "inventory file parsed"
    );
    Ok(table)
}

/// Reads an inventory file into a `DataFrame` of text columns.
///
/// `.xlsx`, `.xlsm` and `.xls` files are read as workbooks; anything else is
/// delimited text.
pub fn read_inventory(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    if is_workbook(path) {
        return read_workbook(path);
    }
    read_csv_table(path, options)?.into_dataframe()
}

/// Whether the file extension names a spreadsheet workbook.
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization_collapses_whitespace() {
        assert_eq!(normalize_header("  Numéro   de\ttête "), "Numéro de tête");
        assert_eq!(normalize_header("\u{feff}Marque"), "Marque");
    }

    #[test]
    fn headers_are_made_unique() {
        let headers = unique_headers(vec![
            "Marque".to_string(),
            String::new(),
            "Marque".to_string(),
        ]);
        assert_eq!(headers, vec!["Marque", "Unnamed: 1", "Marque.1"]);
    }

    #[test]
    fn short_rows_are_padded() {
        let table = parse_csv_text("A;B;C\n1;2\n\n;;\n4;5;6\n", b';', Path::new("t.csv"))
            .expect("parse");
        assert_eq!(table.headers, vec!["A", "B", "C"]);
        assert_eq!(table.rows, vec![vec!["1", "2", ""], vec!["4", "5", "6"]]);
    }

    #[test]
    fn workbook_extensions_are_recognised() {
        assert!(is_workbook(Path::new("exports/radio.xlsx")));
        assert!(is_workbook(Path::new("exports/RADIO.XLS")));
        assert!(!is_workbook(Path::new("exports/radio.csv")));
        assert!(!is_workbook(Path::new("exports/xlsx")));
    }

    #[test]
    fn empty_text_is_an_error() {
        let err = parse_csv_text("\n\n", b',', Path::new("t.csv")).unwrap_err();
        assert!(matches!(err, IngestError::EmptyCsv { .. }));
    }
}
