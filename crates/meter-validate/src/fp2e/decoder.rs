use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// FP2E serial grammar: letter, two digits, two letters, six digits.
static FP2E_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][0-9]{2}[A-Z]{2}[0-9]{6}$").expect("Invalid FP2E regex")
});

/// Why a serial could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The serial does not follow the FP2E grammar.
    #[error("serial is not FP2E-formed")]
    NotFp2e,
    /// The serial matched the grammar but a field could not be extracted.
    #[error("serial is too short to decode")]
    Truncated,
}

/// Fields decoded from an FP2E serial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fp2eCode {
    /// Characters 1-2: last two digits of the manufacture year.
    pub year_digits: String,
    /// Character 4, upper-cased: nominal diameter class.
    pub diameter_letter: char,
}

impl Fp2eCode {
    /// Decodes a serial; surrounding whitespace is ignored.
    pub fn decode(serial: &str) -> Result<Self, DecodeError> {
        let serial = serial.trim();
        if !is_fp2e_formed(serial) {
            return Err(DecodeError::NotFp2e);
        }
        let chars: Vec<char> = serial.chars().collect();
        let year_digits: String = chars.get(1..3).ok_or(DecodeError::Truncated)?.iter().collect();
        let diameter_letter = chars
            .get(4)
            .ok_or(DecodeError::Truncated)?
            .to_ascii_uppercase();
        Ok(Self {
            year_digits,
            diameter_letter,
        })
    }

    /// Nominal diameters (mm) allowed for this serial's diameter class.
    pub fn expected_diameters(&self) -> &'static [u32] {
        expected_diameters(self.diameter_letter)
    }
}

/// True when the trimmed serial follows the FP2E grammar.
pub fn is_fp2e_formed(serial: &str) -> bool {
    FP2E_REGEX.is_match(serial.trim())
}

/// Nominal diameters (mm) for an FP2E diameter letter.
///
/// Unknown letters map to an empty slice, so no diameter can ever conform.
pub fn expected_diameters(letter: char) -> &'static [u32] {
    match letter.to_ascii_uppercase() {
        'A' | 'U' | 'V' => &[15],
        'B' => &[20],
        'C' => &[25],
        'D' => &[30],
        'E' => &[40],
        'F' => &[50],
        'G' => &[60, 65],
        'H' => &[80],
        'I' => &[100],
        'J' => &[125],
        'K' => &[150],
        _ => &[],
    }
}
