//! Column resolution and row normalization.

use polars::prelude::{Column, DataFrame};

use meter_common::{coerce_f64, normalize_text, normalize_year};
use meter_model::columns::{
    BRAND, COUNTER_TYPE, DIAMETER, HEAD_NUMBER, LATITUDE, LONGITUDE, MANUFACTURE_YEAR,
    PROCESSED_CODE, PROTOCOL, READ_MODE, SERIAL_NUMBER,
};
use meter_model::{Brand, CaseInsensitiveLookup, MeterRecord, ReadMode, Variant};

use crate::error::Result;

/// Canonical names from `required` that the frame does not provide.
pub fn missing_columns(df: &DataFrame, required: &[&str]) -> Vec<String> {
    let lookup = CaseInsensitiveLookup::new(df.get_column_names_owned());
    required
        .iter()
        .filter(|name| !lookup.contains(name))
        .map(|name| (*name).to_string())
        .collect()
}

/// Reads every row of `df` into a [`MeterRecord`].
///
/// Absent optional columns read as missing values. Manual inventories force
/// the manual read mode on every row. The frame itself is never modified.
pub fn extract_records(df: &DataFrame, variant: Variant) -> Result<Vec<MeterRecord>> {
    let lookup = CaseInsensitiveLookup::new(df.get_column_names_owned());
    let column = |name: &str| resolve(df, &lookup, name);

    let brand = column(BRAND)?;
    let serial = column(SERIAL_NUMBER)?;
    let head = column(HEAD_NUMBER)?;
    let year = column(MANUFACTURE_YEAR)?;
    let diameter = column(DIAMETER)?;
    let protocol = column(PROTOCOL)?;
    let read_mode = column(READ_MODE)?;
    let latitude = column(LATITUDE)?;
    let longitude = column(LONGITUDE)?;
    let counter_type = column(COUNTER_TYPE)?;
    let processed = column(PROCESSED_CODE)?;

    let mut records = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let brand_raw = text_at(brand, idx);
        let read_mode = match variant {
            Variant::Manual => ReadMode::Manual,
            Variant::Radio | Variant::Remote => ReadMode::parse(&text_at(read_mode, idx)),
        };
        records.push(MeterRecord {
            brand: Brand::canonicalize(&brand_raw),
            brand_raw,
            serial_number: text_at(serial, idx),
            head_number: text_at(head, idx),
            manufacture_year: normalize_year(&text_at(year, idx)),
            diameter: number_at(diameter, idx),
            radio_protocol: text_at(protocol, idx),
            read_mode,
            latitude: number_at(latitude, idx),
            longitude: number_at(longitude, idx),
            counter_type: counter_type.map(|col| text_at(Some(col), idx)),
            processed_code: text_at(processed, idx),
        });
    }
    Ok(records)
}

fn resolve<'a>(
    df: &'a DataFrame,
    lookup: &CaseInsensitiveLookup,
    name: &str,
) -> Result<Option<&'a Column>> {
    match lookup.get(name) {
        Some(actual) => Ok(Some(df.column(actual)?)),
        None => Ok(None),
    }
}

fn text_at(column: Option<&Column>, idx: usize) -> String {
    column
        .and_then(|col| col.get(idx).ok())
        .map(normalize_text)
        .unwrap_or_default()
}

fn number_at(column: Option<&Column>, idx: usize) -> Option<f64> {
    column
        .and_then(|col| col.get(idx).ok())
        .and_then(coerce_f64)
}
