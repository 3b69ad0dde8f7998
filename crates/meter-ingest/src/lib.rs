//! Inventory ingestion utilities.
//!
//! Loads a delimited or workbook export of the meter inventory into a Polars
//! `DataFrame` whose columns are all text. Typing is left to the validator,
//! which owns every coercion.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use meter_ingest::{IngestOptions, read_inventory};
//!
//! let df = read_inventory(Path::new("exports/radio.csv"), &IngestOptions::default())?;
//! ```

mod delimiter;
mod encoding;
mod error;
mod table;
mod workbook;

pub use delimiter::{DEFAULT_DELIMITER, SNIFF_SAMPLE_BYTES, sniff_delimiter};
pub use encoding::{SourceEncoding, decode_bytes};
pub use error::{IngestError, Result};
pub use table::{
    CsvTable, IngestOptions, is_workbook, parse_csv_text, read_csv_table, read_inventory,
};
pub use workbook::{cell_text, range_rows, read_workbook};
