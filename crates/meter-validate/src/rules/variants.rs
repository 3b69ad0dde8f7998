//! Rule order and FP2E gating of each inventory variant.

use meter_model::columns::{
    BRAND, DIAMETER, HEAD_NUMBER, LATITUDE, LOCALITY, LONGITUDE, MANUFACTURE_YEAR,
    PROCESSED_CODE, PROTOCOL, READ_MODE, SERIAL_NUMBER,
};
use meter_model::{CorrectionField, Fault, MeterRecord, Variant};

use super::{Fp2eStage, Rule, RuleSet, cross_field, general, itron, kamstrup, sappel};
use crate::fp2e::{UnformedSerialPolicy, is_fp2e_formed};

const RADIO_COLUMNS: &[&str] = &[
    PROTOCOL,
    BRAND,
    HEAD_NUMBER,
    SERIAL_NUMBER,
    LATITUDE,
    LONGITUDE,
    LOCALITY,
    MANUFACTURE_YEAR,
    DIAMETER,
    READ_MODE,
];

const REMOTE_COLUMNS: &[&str] = &[
    PROTOCOL,
    BRAND,
    SERIAL_NUMBER,
    HEAD_NUMBER,
    LATITUDE,
    LONGITUDE,
    MANUFACTURE_YEAR,
    DIAMETER,
    PROCESSED_CODE,
    READ_MODE,
];

const MANUAL_COLUMNS: &[&str] = &[
    LATITUDE,
    LONGITUDE,
    SERIAL_NUMBER,
    BRAND,
    MANUFACTURE_YEAR,
    DIAMETER,
];

fn manual_and_formed(record: &MeterRecord) -> bool {
    record.is_manual() && is_fp2e_formed(&record.serial_number)
}

fn protocol_missing() -> Rule {
    Rule::new(
        Fault::ProtocolMissing,
        "protocol empty (automatic reads)",
        general::protocol_missing,
    )
}

fn presence_rules() -> [Rule; 4] {
    [
        Rule::new(Fault::BrandMissing, "brand empty", general::brand_missing),
        Rule::new(Fault::SerialMissing, "serial empty", general::serial_missing),
        Rule::new(
            Fault::DiameterMissing,
            "diameter empty or not numeric",
            general::diameter_missing,
        ),
        Rule::new(Fault::YearMissing, "manufacture year empty", general::year_missing),
    ]
}

fn gps_rules() -> [Rule; 2] {
    [
        Rule::new(
            Fault::GpsNotNumeric,
            "latitude or longitude not numeric",
            general::gps_not_numeric,
        ),
        Rule::new(
            Fault::GpsInvalid,
            "latitude or longitude zero or out of range",
            general::gps_invalid,
        ),
    ]
}

fn sappel_brand_rules() -> [Rule; 2] {
    [
        Rule::new(
            Fault::SappelBrandC,
            "Sappel serial starts with C but brand is not SAPPEL (C)",
            sappel::brand_c,
        )
        .with_correction(CorrectionField::Brand, sappel::brand_c_value),
        Rule::new(
            Fault::SappelBrandH,
            "Sappel serial starts with H but brand is not SAPPEL (H)",
            sappel::brand_h,
        )
        .with_correction(CorrectionField::Brand, sappel::brand_h_value),
    ]
}

fn counter_type() -> Rule {
    Rule::new(
        Fault::CounterTypeMismatch,
        "counter type differs from the code implied by the serial",
        cross_field::counter_type_mismatch,
    )
    .with_correction(CorrectionField::CounterType, cross_field::derived_counter_type)
}

pub(super) fn radio() -> RuleSet {
    let mut rules = vec![protocol_missing()];
    rules.extend(presence_rules());
    rules.push(
        Rule::new(
            Fault::HeadMissing,
            "head empty (automatic reads, Sappel from 2022)",
            general::head_missing_radio,
        )
        .with_correction(CorrectionField::HeadNumber, general::head_from_serial),
    );
    rules.extend(gps_rules());
    rules.extend([
        Rule::new(
            Fault::KamstrupSerialLength,
            "Kamstrup serial length is not 8",
            kamstrup::serial_length,
        ),
        Rule::new(
            Fault::KamstrupSerialHeadMismatch,
            "Kamstrup serial differs from head",
            kamstrup::serial_head_mismatch,
        ),
        Rule::new(
            Fault::KamstrupNotNumeric,
            "Kamstrup serial or head not all digits",
            kamstrup::not_numeric,
        ),
        Rule::new(
            Fault::KamstrupDiameterRange,
            "Kamstrup diameter outside [15, 80]",
            kamstrup::diameter_range,
        ),
        Rule::new(
            Fault::KamstrupProtocol,
            "Kamstrup protocol is not WMS",
            kamstrup::protocol,
        )
        .with_correction(CorrectionField::RadioProtocol, kamstrup::expected_protocol),
        Rule::new(
            Fault::SappelDmeHeadLength,
            "Sappel DME head length is not 15",
            sappel::dme_head_length,
        ),
        Rule::new(
            Fault::SappelSerialPrefix,
            "Sappel serial does not start with C or H (automatic reads)",
            sappel::serial_prefix,
        ),
    ]);
    rules.extend(sappel_brand_rules());
    rules.extend([
        Rule::new(
            Fault::SappelHeadNotDme,
            "Sappel after 2022 without a DME head",
            sappel::head_not_dme,
        ),
        Rule::new(
            Fault::SappelProtocol,
            "Sappel after 2022 with protocol other than OMS",
            sappel::protocol,
        )
        .with_correction(CorrectionField::RadioProtocol, sappel::expected_protocol),
        Rule::new(
            Fault::ItronSerialPrefix,
            "Itron serial does not start with I or D (automatic reads)",
            itron::serial_prefix,
        ),
        counter_type(),
    ]);

    RuleSet {
        variant: Variant::Radio,
        required_columns: RADIO_COLUMNS,
        rules,
        fp2e: Fp2eStage::new(
            "Sappel automatic reads, or manual reads with an FP2E serial",
            |record| (record.is_sappel() && !record.is_manual()) || manual_and_formed(record),
            UnformedSerialPolicy::Conforming,
        ),
    }
}

pub(super) fn remote() -> RuleSet {
    let mut rules = vec![protocol_missing()];
    rules.extend(presence_rules());
    rules.push(
        Rule::new(
            Fault::HeadMissing,
            "head empty (automatic reads, except Kamstrup and Kaifa)",
            general::head_missing_remote,
        ),
    );
    rules.extend(gps_rules());
    rules.extend([
        Rule::new(
            Fault::KamstrupSerialLength,
            "Kamstrup serial length is not 8",
            kamstrup::serial_length,
        ),
        Rule::new(
            Fault::SappelHeadLength,
            "Sappel head length is not 16",
            sappel::remote_head_length,
        ),
        Rule::new(
            Fault::SappelSerialPrefix,
            "Sappel serial does not start with C or H (automatic reads)",
            sappel::serial_prefix,
        ),
    ]);
    rules.extend(sappel_brand_rules());
    rules.extend([
        Rule::new(
            Fault::ItronHeadLength,
            "Itron head length is not 8",
            itron::remote_head_length,
        ),
        Rule::new(
            Fault::ItronSerialPrefix,
            "Itron serial does not start with I or D (automatic reads)",
            itron::serial_prefix,
        ),
        Rule::new(
            Fault::ProcessedProtocolMismatch,
            "protocol differs from the one implied by Traité (903/863 => LRA, else SGX)",
            cross_field::processed_protocol_mismatch,
        )
        .with_correction(CorrectionField::RadioProtocol, cross_field::expected_protocol),
        counter_type(),
    ]);

    RuleSet {
        variant: Variant::Remote,
        required_columns: REMOTE_COLUMNS,
        rules,
        fp2e: Fp2eStage::new(
            "Sappel or Itron automatic reads, or manual reads with an FP2E serial",
            |record| {
                ((record.is_sappel() || record.is_itron()) && !record.is_manual())
                    || manual_and_formed(record)
            },
            UnformedSerialPolicy::Fault,
        ),
    }
}

pub(super) fn manual() -> RuleSet {
    let mut rules = Vec::from(presence_rules());
    rules.extend(gps_rules());
    rules.extend([
        Rule::new(
            Fault::ItronSerialPrefix,
            "Itron FP2E serial does not start with I or D",
            itron::formed_serial_prefix,
        ),
        Rule::new(
            Fault::SappelSerialPrefix,
            "Sappel FP2E serial does not start with C or H",
            sappel::formed_serial_prefix,
        ),
        counter_type(),
    ]);

    RuleSet {
        variant: Variant::Manual,
        required_columns: MANUAL_COLUMNS,
        rules,
        fp2e: Fp2eStage::new(
            "records with an FP2E serial",
            |record| is_fp2e_formed(&record.serial_number),
            UnformedSerialPolicy::Conforming,
        ),
    }
}
