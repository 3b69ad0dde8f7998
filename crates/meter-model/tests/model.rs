//! Tests for meter-model types.

use std::str::FromStr;

use meter_model::{
    Brand, Correction, CorrectionField, Fault, MeterRecord, ModelError, ReadMode, Variant,
};

#[test]
fn variant_parses_aliases() {
    assert_eq!(Variant::from_str("radio").unwrap(), Variant::Radio);
    assert_eq!(Variant::from_str("Télérelève").unwrap(), Variant::Remote);
    assert_eq!(Variant::from_str("MANUAL").unwrap(), Variant::Manual);
    let err = Variant::from_str("drive-by").unwrap_err();
    assert!(err.to_string().contains("drive-by"));
    let ModelError::UnknownVariant(raw) = err;
    assert_eq!(raw, "drive-by");
}

#[test]
fn fault_codes_are_unique() {
    let faults = [
        Fault::ProtocolMissing,
        Fault::BrandMissing,
        Fault::SerialMissing,
        Fault::DiameterMissing,
        Fault::YearMissing,
        Fault::HeadMissing,
        Fault::GpsNotNumeric,
        Fault::GpsInvalid,
        Fault::KamstrupSerialLength,
        Fault::KamstrupSerialHeadMismatch,
        Fault::KamstrupNotNumeric,
        Fault::KamstrupDiameterRange,
        Fault::KamstrupProtocol,
        Fault::SappelDmeHeadLength,
        Fault::SappelSerialPrefix,
        Fault::SappelBrandC,
        Fault::SappelBrandH,
        Fault::SappelHeadNotDme,
        Fault::SappelProtocol,
        Fault::SappelHeadLength,
        Fault::ItronSerialPrefix,
        Fault::ItronHeadLength,
        Fault::CounterTypeMismatch,
        Fault::ProcessedProtocolMismatch,
        Fault::Fp2eYear,
        Fault::Fp2eDiameter,
        Fault::Fp2eFormat,
        Fault::Fp2eSerial,
    ];
    let codes: std::collections::BTreeSet<_> = faults.iter().map(Fault::code).collect();
    let labels: std::collections::BTreeSet<_> = faults.iter().map(Fault::label).collect();
    assert_eq!(codes.len(), faults.len());
    assert_eq!(labels.len(), faults.len());
}

#[test]
fn fault_serializes_as_code() {
    let json = serde_json::to_string(&Fault::KamstrupProtocol).expect("serialize fault");
    assert_eq!(json, "\"kamstrup_protocol\"");
}

#[test]
fn correction_round_trips_through_json() {
    let correction = Correction::new(Fault::Fp2eYear, CorrectionField::ManufactureYear, "16");
    let json = serde_json::to_string(&correction).expect("serialize correction");
    let round: Correction = serde_json::from_str(&json).expect("deserialize correction");
    assert_eq!(round, correction);
}

#[test]
fn record_brand_helpers() {
    let record = MeterRecord {
        brand_raw: "Sappel (H)".to_string(),
        brand: Brand::canonicalize("Sappel (H)"),
        read_mode: ReadMode::parse("manuelle"),
        ..MeterRecord::default()
    };
    assert!(record.is_sappel());
    assert!(!record.is_kamstrup());
    assert!(record.is_manual());
    assert!(!record.has_head());
}

#[test]
fn correction_columns_are_distinct() {
    let names: std::collections::BTreeSet<_> = CorrectionField::ALL
        .iter()
        .map(CorrectionField::column_name)
        .collect();
    assert_eq!(names.len(), CorrectionField::ALL.len());
}
