//! Sappel numbering rules.
//!
//! Sappel product lines are told apart by the first serial character:
//! `C` for `SAPPEL (C)` and `H` for `SAPPEL (H)`. From 2023 on, heads are
//! DME modules and the radio protocol is OMS.

use meter_model::{Brand, MeterRecord};

use super::general::SAPPEL_DME_YEAR;
use crate::fp2e::is_fp2e_formed;

const SERIAL_PREFIXES: [char; 2] = ['C', 'H'];
const DME_PREFIX: &str = "DME";
const DME_HEAD_LEN: usize = 15;
const REMOTE_HEAD_LEN: usize = 16;
pub(super) const PROTOCOL: &str = "OMS";

fn is_dme_era(record: &MeterRecord) -> bool {
    record.year_value().is_some_and(|year| year > SAPPEL_DME_YEAR)
}

pub(super) fn dme_head_length(record: &MeterRecord) -> bool {
    record.is_sappel()
        && record.head_number.starts_with(DME_PREFIX)
        && record.head_len() != DME_HEAD_LEN
}

pub(super) fn serial_prefix(record: &MeterRecord) -> bool {
    record.is_sappel() && !record.is_manual() && !record.serial_starts_with_any(&SERIAL_PREFIXES)
}

/// Manual inventories: only FP2E-formed serials are checked.
pub(super) fn formed_serial_prefix(record: &MeterRecord) -> bool {
    record.is_sappel()
        && is_fp2e_formed(&record.serial_number)
        && !record.serial_starts_with_any(&SERIAL_PREFIXES)
}

pub(super) fn brand_c(record: &MeterRecord) -> bool {
    record.is_sappel() && record.serial_starts_with_any(&['C']) && !record.is_brand(Brand::SappelC)
}

pub(super) fn brand_h(record: &MeterRecord) -> bool {
    record.is_sappel() && record.serial_starts_with_any(&['H']) && !record.is_brand(Brand::SappelH)
}

pub(super) fn brand_c_value(_record: &MeterRecord) -> Option<String> {
    Some(Brand::SappelC.as_str().to_string())
}

pub(super) fn brand_h_value(_record: &MeterRecord) -> Option<String> {
    Some(Brand::SappelH.as_str().to_string())
}

pub(super) fn head_not_dme(record: &MeterRecord) -> bool {
    record.is_sappel() && is_dme_era(record) && !record.head_number.starts_with(DME_PREFIX)
}

pub(super) fn protocol(record: &MeterRecord) -> bool {
    record.is_sappel()
        && is_dme_era(record)
        && !record.radio_protocol.eq_ignore_ascii_case(PROTOCOL)
}

pub(super) fn expected_protocol(_record: &MeterRecord) -> Option<String> {
    Some(PROTOCOL.to_string())
}

pub(super) fn remote_head_length(record: &MeterRecord) -> bool {
    record.is_sappel() && record.has_head() && record.head_len() != REMOTE_HEAD_LEN
}
