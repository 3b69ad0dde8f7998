//! Normalized inventory row.

use serde::{Deserialize, Serialize};

use crate::brand::{Brand, ReadMode};

/// One inventory row after column normalization and coercion.
///
/// Text fields are trimmed with `nan`/blank mapped to `""`; numeric fields
/// are `None` when the source cell was missing or unparseable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeterRecord {
    /// Brand as written in the source.
    pub brand_raw: String,
    /// Canonical brand, `None` when the source cell was empty.
    pub brand: Option<Brand>,
    pub serial_number: String,
    pub head_number: String,
    /// Zero-padded two-character year, `""` when missing.
    pub manufacture_year: String,
    pub diameter: Option<f64>,
    pub radio_protocol: String,
    pub read_mode: ReadMode,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Declared counter type, `None` when the inventory has no such column.
    pub counter_type: Option<String>,
    pub processed_code: String,
}

impl MeterRecord {
    pub fn is_manual(&self) -> bool {
        self.read_mode.is_manual()
    }

    pub fn is_brand(&self, brand: Brand) -> bool {
        self.brand == Some(brand)
    }

    pub fn is_kamstrup(&self) -> bool {
        self.is_brand(Brand::Kamstrup)
    }

    pub fn is_sappel(&self) -> bool {
        self.brand.is_some_and(|brand| brand.is_sappel())
    }

    pub fn is_itron(&self) -> bool {
        self.is_brand(Brand::Itron)
    }

    pub fn is_kaifa(&self) -> bool {
        self.is_brand(Brand::Kaifa)
    }

    pub fn has_head(&self) -> bool {
        !self.head_number.is_empty()
    }

    /// Manufacture year as a number, `None` when missing or non-numeric.
    pub fn year_value(&self) -> Option<u32> {
        self.manufacture_year.parse().ok()
    }

    /// Number of characters (not bytes) in the serial.
    pub fn serial_len(&self) -> usize {
        self.serial_number.chars().count()
    }

    /// Number of characters (not bytes) in the head number.
    pub fn head_len(&self) -> usize {
        self.head_number.chars().count()
    }

    pub fn serial_starts_with_any(&self, prefixes: &[char]) -> bool {
        self.serial_number
            .chars()
            .next()
            .is_some_and(|first| prefixes.contains(&first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_value_parses_normalized_year() {
        let record = MeterRecord {
            manufacture_year: "07".to_string(),
            ..MeterRecord::default()
        };
        assert_eq!(record.year_value(), Some(7));

        let missing = MeterRecord::default();
        assert_eq!(missing.year_value(), None);
    }

    #[test]
    fn serial_prefix_is_case_sensitive() {
        let record = MeterRecord {
            serial_number: "C15BA123456".to_string(),
            ..MeterRecord::default()
        };
        assert!(record.serial_starts_with_any(&['C', 'H']));
        assert!(!record.serial_starts_with_any(&['c']));
    }
}
