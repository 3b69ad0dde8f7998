//! Fault labels and proposed corrections.
//!
//! Labels are the operator-facing strings shown in reports; codes are stable
//! identifiers for machine consumers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::variant::Variant;

/// Separator between fault labels in a row's display string.
pub const FAULT_SEPARATOR: &str = " / ";

/// A detectable anomaly on one inventory row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fault {
    // General presence and format checks
    ProtocolMissing,
    BrandMissing,
    SerialMissing,
    DiameterMissing,
    YearMissing,
    HeadMissing,
    GpsNotNumeric,
    GpsInvalid,

    // Kamstrup
    KamstrupSerialLength,
    KamstrupSerialHeadMismatch,
    KamstrupNotNumeric,
    KamstrupDiameterRange,
    KamstrupProtocol,

    // Sappel
    SappelDmeHeadLength,
    SappelSerialPrefix,
    SappelBrandC,
    SappelBrandH,
    SappelHeadNotDme,
    SappelProtocol,
    SappelHeadLength,

    // Itron
    ItronSerialPrefix,
    ItronHeadLength,

    // Cross-field consistency
    CounterTypeMismatch,
    ProcessedProtocolMismatch,

    // FP2E numbering standard
    Fp2eYear,
    Fp2eDiameter,
    Fp2eFormat,
    Fp2eSerial,
}

impl Fault {
    /// Operator-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProtocolMissing => "Protocole Radio manquant",
            Self::BrandMissing => "Marque manquante",
            Self::SerialMissing => "Numéro de compteur manquant",
            Self::DiameterMissing => "Diamètre manquant",
            Self::YearMissing => "Année de fabrication manquante",
            Self::HeadMissing => "Numéro de tête manquant",
            Self::GpsNotNumeric => "Coordonnées GPS non numériques",
            Self::GpsInvalid => "Coordonnées GPS invalides",
            Self::KamstrupSerialLength => "KAMSTRUP: Compteur ≠ 8 caractères",
            Self::KamstrupSerialHeadMismatch => "KAMSTRUP: Compteur ≠ Tête",
            Self::KamstrupNotNumeric => "KAMSTRUP: Compteur ou Tête non numérique",
            Self::KamstrupDiameterRange => "KAMSTRUP: Diamètre hors plage [15, 80]",
            Self::KamstrupProtocol => "KAMSTRUP: Protocole ≠ WMS",
            Self::SappelDmeHeadLength => "SAPPEL: Tête DME ≠ 15 caractères",
            Self::SappelSerialPrefix => "SAPPEL: Compteur ne commence pas par C ou H",
            Self::SappelBrandC => "SAPPEL: Compteur C mais marque ≠ SAPPEL (C)",
            Self::SappelBrandH => "SAPPEL: Compteur H mais marque ≠ SAPPEL (H)",
            Self::SappelHeadNotDme => "SAPPEL: Année > 22 et Tête ne commence pas par DME",
            Self::SappelProtocol => "SAPPEL: Année > 22 et Protocole ≠ OMS",
            Self::SappelHeadLength => "SAPPEL: Tête ≠ 16 caractères",
            Self::ItronSerialPrefix => "ITRON: Compteur ne commence pas par I ou D",
            Self::ItronHeadLength => "ITRON: Tête ≠ 8 caractères",
            Self::CounterTypeMismatch => "Type de compteur non conforme",
            Self::ProcessedProtocolMismatch => "Protocole Radio incohérent avec Traité",
            Self::Fp2eYear => "L'année de millésime n'est pas conforme",
            Self::Fp2eDiameter => "Le diamètre n'est pas conforme",
            Self::Fp2eFormat => "Format de compteur non FP2E",
            Self::Fp2eSerial => "Le numéro de compteur n'est pas conforme",
        }
    }

    /// Label as worded in `variant` reports.
    ///
    /// Remote inventories phrase the FP2E findings differently; every other
    /// label is shared.
    pub fn label_in(&self, variant: Variant) -> &'static str {
        match (variant, self) {
            (Variant::Remote, Self::Fp2eYear) => "Année millésime non conforme FP2E",
            (Variant::Remote, Self::Fp2eDiameter) => "Diamètre non conforme FP2E",
            (Variant::Remote, Self::Fp2eSerial) => "Erreur de format interne",
            _ => self.label(),
        }
    }

    /// Stable snake_case identifier.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProtocolMissing => "protocol_missing",
            Self::BrandMissing => "brand_missing",
            Self::SerialMissing => "serial_missing",
            Self::DiameterMissing => "diameter_missing",
            Self::YearMissing => "year_missing",
            Self::HeadMissing => "head_missing",
            Self::GpsNotNumeric => "gps_not_numeric",
            Self::GpsInvalid => "gps_invalid",
            Self::KamstrupSerialLength => "kamstrup_serial_length",
            Self::KamstrupSerialHeadMismatch => "kamstrup_serial_head_mismatch",
            Self::KamstrupNotNumeric => "kamstrup_not_numeric",
            Self::KamstrupDiameterRange => "kamstrup_diameter_range",
            Self::KamstrupProtocol => "kamstrup_protocol",
            Self::SappelDmeHeadLength => "sappel_dme_head_length",
            Self::SappelSerialPrefix => "sappel_serial_prefix",
            Self::SappelBrandC => "sappel_brand_c",
            Self::SappelBrandH => "sappel_brand_h",
            Self::SappelHeadNotDme => "sappel_head_not_dme",
            Self::SappelProtocol => "sappel_protocol",
            Self::SappelHeadLength => "sappel_head_length",
            Self::ItronSerialPrefix => "itron_serial_prefix",
            Self::ItronHeadLength => "itron_head_length",
            Self::CounterTypeMismatch => "counter_type_mismatch",
            Self::ProcessedProtocolMismatch => "processed_protocol_mismatch",
            Self::Fp2eYear => "fp2e_year",
            Self::Fp2eDiameter => "fp2e_diameter",
            Self::Fp2eFormat => "fp2e_format",
            Self::Fp2eSerial => "fp2e_serial",
        }
    }

    /// True for faults emitted by the FP2E checker.
    pub fn is_fp2e(&self) -> bool {
        matches!(
            self,
            Self::Fp2eYear | Self::Fp2eDiameter | Self::Fp2eFormat | Self::Fp2eSerial
        )
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Joins the `variant` labels of `faults` in evaluation order with
/// [`FAULT_SEPARATOR`].
pub fn join_faults(faults: &[Fault], variant: Variant) -> String {
    faults
        .iter()
        .map(|fault| fault.label_in(variant))
        .collect::<Vec<_>>()
        .join(FAULT_SEPARATOR)
}

/// Field a correction proposes a replacement value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionField {
    ManufactureYear,
    Diameter,
    Brand,
    HeadNumber,
    RadioProtocol,
    CounterType,
}

impl CorrectionField {
    pub const ALL: [CorrectionField; 6] = [
        CorrectionField::ManufactureYear,
        CorrectionField::Diameter,
        CorrectionField::Brand,
        CorrectionField::HeadNumber,
        CorrectionField::RadioProtocol,
        CorrectionField::CounterType,
    ];

    /// Name of the output column carrying this correction.
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::ManufactureYear => "Correction Année de fabrication",
            Self::Diameter => "Correction Diametre",
            Self::Brand => "Correction Marque",
            Self::HeadNumber => "Correction Numéro de tête",
            Self::RadioProtocol => "Correction Protocole Radio",
            Self::CounterType => "Correction Type de compteur",
        }
    }
}

/// A proposed replacement value, tied to the fault that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub fault: Fault,
    pub field: CorrectionField,
    pub value: String,
}

impl Correction {
    pub fn new(fault: Fault, field: CorrectionField, value: impl Into<String>) -> Self {
        Self {
            fault,
            field,
            value: value.into(),
        }
    }
}
