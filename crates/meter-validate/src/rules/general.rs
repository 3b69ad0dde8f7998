//! Brand-independent presence and GPS checks.

use meter_model::MeterRecord;

/// Year from which Sappel meters carry a mandatory DME head.
pub(super) const SAPPEL_DME_YEAR: u32 = 22;

const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

pub(super) fn protocol_missing(record: &MeterRecord) -> bool {
    record.radio_protocol.is_empty() && !record.is_manual()
}

pub(super) fn brand_missing(record: &MeterRecord) -> bool {
    record.brand_raw.is_empty()
}

pub(super) fn serial_missing(record: &MeterRecord) -> bool {
    record.serial_number.is_empty()
}

pub(super) fn diameter_missing(record: &MeterRecord) -> bool {
    record.diameter.is_none()
}

pub(super) fn year_missing(record: &MeterRecord) -> bool {
    record.manufacture_year.is_empty()
}

/// Radio inventories: Sappel meters older than the DME era have no head.
pub(super) fn head_missing_radio(record: &MeterRecord) -> bool {
    !record.has_head()
        && !record.is_manual()
        && (!record.is_sappel()
            || record
                .year_value()
                .is_some_and(|year| year >= SAPPEL_DME_YEAR))
}

/// Remote inventories: Kamstrup and Kaifa heads are optional.
pub(super) fn head_missing_remote(record: &MeterRecord) -> bool {
    !record.has_head() && !record.is_manual() && !record.is_kamstrup() && !record.is_kaifa()
}

/// Kamstrup heads carry the meter serial.
pub(super) fn head_from_serial(record: &MeterRecord) -> Option<String> {
    record
        .is_kamstrup()
        .then(|| record.serial_number.clone())
}

pub(super) fn gps_not_numeric(record: &MeterRecord) -> bool {
    record.latitude.is_none() || record.longitude.is_none()
}

/// Zero is never a valid coordinate; a missing one is invalid too, on top
/// of [`gps_not_numeric`].
pub(super) fn gps_invalid(record: &MeterRecord) -> bool {
    let invalid = |value: Option<f64>, (min, max): (f64, f64)| {
        value.is_none_or(|v| v == 0.0 || v < min || v > max)
    };
    invalid(record.latitude, LATITUDE_RANGE) || invalid(record.longitude, LONGITUDE_RANGE)
}
