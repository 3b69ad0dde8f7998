use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Inventory flavour, each with its own required columns and rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Radio-read (drive-by) meters.
    Radio,
    /// Remote-read (fixed network) meters.
    Remote,
    /// Manually read meters.
    Manual,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Radio, Variant::Remote, Variant::Manual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Radio => "radio",
            Self::Remote => "remote",
            Self::Manual => "manual",
        }
    }

    /// Operator-facing name of the inventory.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Radio => "Radiorelève",
            Self::Remote => "Télérelève",
            Self::Manual => "Relève manuelle",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "radio" | "radioreleve" | "radiorelève" => Ok(Self::Radio),
            "remote" | "tele" | "télérelève" | "telereleve" => Ok(Self::Remote),
            "manual" | "manuelle" => Ok(Self::Manual),
            _ => Err(ModelError::UnknownVariant(s.to_string())),
        }
    }
}
