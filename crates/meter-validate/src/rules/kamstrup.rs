//! Kamstrup numbering rules.

use meter_common::is_all_digits;
use meter_model::MeterRecord;

const SERIAL_LEN: usize = 8;
const DIAMETER_RANGE: (f64, f64) = (15.0, 80.0);
pub(super) const PROTOCOL: &str = "WMS";

pub(super) fn serial_length(record: &MeterRecord) -> bool {
    record.is_kamstrup() && record.serial_len() != SERIAL_LEN
}

pub(super) fn serial_head_mismatch(record: &MeterRecord) -> bool {
    record.is_kamstrup() && record.has_head() && record.serial_number != record.head_number
}

/// Blank fields are reported by the presence rules instead.
pub(super) fn not_numeric(record: &MeterRecord) -> bool {
    record.is_kamstrup()
        && ((!record.serial_number.is_empty() && !is_all_digits(&record.serial_number))
            || (record.has_head() && !is_all_digits(&record.head_number)))
}

pub(super) fn diameter_range(record: &MeterRecord) -> bool {
    let (min, max) = DIAMETER_RANGE;
    record.is_kamstrup()
        && record
            .diameter
            .is_some_and(|diameter| diameter < min || diameter > max)
}

pub(super) fn protocol(record: &MeterRecord) -> bool {
    record.is_kamstrup() && !record.radio_protocol.eq_ignore_ascii_case(PROTOCOL)
}

pub(super) fn expected_protocol(_record: &MeterRecord) -> Option<String> {
    Some(PROTOCOL.to_string())
}
