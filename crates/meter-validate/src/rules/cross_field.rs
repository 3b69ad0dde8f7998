//! Rules comparing two declared fields.

use meter_model::MeterRecord;

const COUNTER_TYPE_SERIAL_LEN: usize = 11;
const LRA_PREFIXES: [&str; 2] = ["903", "863"];
const LRA: &str = "LRA";
const SGX: &str = "SGX";

/// Counter-type code implied by a Sappel or Itron serial.
///
/// Needs an 11-character serial with alphabetic first and fourth characters.
pub(super) fn derived_counter_type(record: &MeterRecord) -> Option<String> {
    if record.serial_len() != COUNTER_TYPE_SERIAL_LEN {
        return None;
    }
    let mut chars = record.serial_number.chars();
    let first = chars.next()?;
    let fourth = chars.nth(2)?;
    if !first.is_alphabetic() || !fourth.is_alphabetic() {
        return None;
    }
    if record.is_sappel() {
        Some(format!("{first}{fourth}"))
    } else if record.is_itron() {
        Some(format!("I{fourth}"))
    } else {
        None
    }
}

/// Only evaluated when the inventory has a counter-type column.
pub(super) fn counter_type_mismatch(record: &MeterRecord) -> bool {
    let Some(declared) = record.counter_type.as_deref() else {
        return false;
    };
    derived_counter_type(record).is_some_and(|expected| !expected.eq_ignore_ascii_case(declared))
}

/// Protocol implied by the `Traité` code of a remote-read meter.
pub(super) fn expected_protocol(record: &MeterRecord) -> Option<String> {
    let protocol = if LRA_PREFIXES
        .iter()
        .any(|prefix| record.processed_code.starts_with(prefix))
    {
        LRA
    } else {
        SGX
    };
    Some(protocol.to_string())
}

pub(super) fn processed_protocol_mismatch(record: &MeterRecord) -> bool {
    !record.is_manual()
        && expected_protocol(record)
            .is_some_and(|expected| !expected.eq_ignore_ascii_case(&record.radio_protocol))
}

#[cfg(test)]
mod tests {
    use meter_model::{Brand, ReadMode};

    use super::*;

    fn typed(brand: Brand, serial: &str, declared: Option<&str>) -> MeterRecord {
        MeterRecord {
            brand: Some(brand),
            serial_number: serial.to_string(),
            counter_type: declared.map(str::to_string),
            ..MeterRecord::default()
        }
    }

    #[test]
    fn sappel_counter_type_uses_first_and_fourth_characters() {
        let record = typed(Brand::SappelC, "C15BA123456", Some("CB"));
        assert_eq!(derived_counter_type(&record).as_deref(), Some("CB"));
        assert!(!counter_type_mismatch(&record));

        let wrong = typed(Brand::SappelC, "C15BA123456", Some("CA"));
        assert!(counter_type_mismatch(&wrong));
    }

    #[test]
    fn itron_counter_type_is_prefixed_with_i() {
        let record = typed(Brand::Itron, "D15CA123456", Some("ic"));
        assert_eq!(derived_counter_type(&record).as_deref(), Some("IC"));
        assert!(!counter_type_mismatch(&record));
    }

    #[test]
    fn counter_type_needs_column_and_eleven_characters() {
        assert!(!counter_type_mismatch(&typed(Brand::SappelC, "C15BA123456", None)));
        assert!(!counter_type_mismatch(&typed(Brand::SappelC, "C15BA12345", Some("XX"))));
        assert!(!counter_type_mismatch(&typed(Brand::SappelC, "C151A123456", Some("XX"))));
        assert!(!counter_type_mismatch(&typed(Brand::Kamstrup, "C15BA123456", Some("XX"))));
    }

    #[test]
    fn processed_code_selects_protocol() {
        let mut record = MeterRecord {
            processed_code: "903001".to_string(),
            radio_protocol: "LRA".to_string(),
            ..MeterRecord::default()
        };
        assert!(!processed_protocol_mismatch(&record));

        record.processed_code = "863".to_string();
        record.radio_protocol = "SGX".to_string();
        assert!(processed_protocol_mismatch(&record));
        assert_eq!(expected_protocol(&record).as_deref(), Some("LRA"));

        record.processed_code = "100".to_string();
        assert!(!processed_protocol_mismatch(&record));

        record.radio_protocol = "LRA".to_string();
        record.read_mode = ReadMode::Manual;
        assert!(!processed_protocol_mismatch(&record));
    }
}
