//! Meter manufacturers and read modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Meter manufacturer, canonicalized from the free-form `Marque` column.
///
/// Sappel meters come in two product lines whose serials start with `C`
/// or `H`; the inventory records the line as part of the brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    Kamstrup,
    SappelC,
    SappelH,
    Itron,
    Kaifa,
    /// Any non-empty brand outside the known set.
    Unknown,
}

impl Brand {
    /// Canonicalizes a raw brand value (case-insensitive).
    ///
    /// Returns `None` for an empty value so callers can flag it as missing.
    pub fn canonicalize(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_uppercase();
        let brand = match upper.as_str() {
            "" => return None,
            "KAMSTRUP" => Self::Kamstrup,
            "SAPPEL (C)" | "SAPPEL(C)" => Self::SappelC,
            "SAPPEL (H)" | "SAPPEL(H)" => Self::SappelH,
            "ITRON" => Self::Itron,
            "KAIFA" => Self::Kaifa,
            _ => Self::Unknown,
        };
        Some(brand)
    }

    /// Canonical spelling used in corrections and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kamstrup => "KAMSTRUP",
            Self::SappelC => "SAPPEL (C)",
            Self::SappelH => "SAPPEL (H)",
            Self::Itron => "ITRON",
            Self::Kaifa => "KAIFA",
            Self::Unknown => "INCONNUE",
        }
    }

    pub fn is_sappel(&self) -> bool {
        matches!(self, Self::SappelC | Self::SappelH)
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a meter is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReadMode {
    /// Radio or remote reading; also the default when the column is blank.
    #[default]
    Automatic,
    /// Visual reading by an operator.
    Manual,
}

impl ReadMode {
    /// Parses the `Mode de relève` column; only `MANUELLE`/`MANUEL` mean manual.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "MANUELLE" | "MANUEL" => Self::Manual,
            _ => Self::Automatic,
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual)
    }
}
