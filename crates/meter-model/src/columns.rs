//! Canonical inventory column names.

pub const PROTOCOL: &str = "Protocole Radio";
pub const BRAND: &str = "Marque";
pub const HEAD_NUMBER: &str = "Numéro de tête";
pub const SERIAL_NUMBER: &str = "Numéro de compteur";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const LOCALITY: &str = "Commune";
pub const MANUFACTURE_YEAR: &str = "Année de fabrication";
pub const DIAMETER: &str = "Diametre";
pub const READ_MODE: &str = "Mode de relève";
pub const PROCESSED_CODE: &str = "Traité";
pub const COUNTER_TYPE: &str = "Type de compteur";

/// Output column holding the original row position.
pub const ORIGINAL_INDEX: &str = "Index original";
/// Output column holding every fault label of a row.
pub const FAULTS: &str = "Anomalie";
/// Output column holding the FP2E checker's own findings.
pub const FP2E_DETAIL: &str = "Anomalie Détaillée FP2E";
