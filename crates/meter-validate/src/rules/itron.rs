//! Itron numbering rules.

use meter_model::MeterRecord;

use crate::fp2e::is_fp2e_formed;

const SERIAL_PREFIXES: [char; 2] = ['I', 'D'];
const REMOTE_HEAD_LEN: usize = 8;

pub(super) fn serial_prefix(record: &MeterRecord) -> bool {
    record.is_itron() && !record.is_manual() && !record.serial_starts_with_any(&SERIAL_PREFIXES)
}

/// Manual inventories: only FP2E-formed serials are checked.
pub(super) fn formed_serial_prefix(record: &MeterRecord) -> bool {
    record.is_itron()
        && is_fp2e_formed(&record.serial_number)
        && !record.serial_starts_with_any(&SERIAL_PREFIXES)
}

pub(super) fn remote_head_length(record: &MeterRecord) -> bool {
    record.is_itron() && record.has_head() && record.head_len() != REMOTE_HEAD_LEN
}
