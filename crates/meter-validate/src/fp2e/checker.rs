use serde::{Deserialize, Serialize};

use meter_common::is_all_digits;
use meter_model::{Correction, CorrectionField, Fault, MeterRecord};

use super::decoder::{DecodeError, Fp2eCode};

/// What the checker does with a serial that is not FP2E-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnformedSerialPolicy {
    /// Not applicable: the record is treated as conforming.
    Conforming,
    /// Reported as [`Fault::Fp2eFormat`].
    Fault,
}

/// Faults and corrections produced by one FP2E check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fp2eOutcome {
    pub faults: Vec<Fault>,
    pub corrections: Vec<Correction>,
}

impl Fp2eOutcome {
    pub fn is_conforming(&self) -> bool {
        self.faults.is_empty()
    }

    fn fault(fault: Fault) -> Self {
        Self {
            faults: vec![fault],
            corrections: Vec::new(),
        }
    }
}

/// Cross-checks a record's manufacture year and diameter against its serial.
///
/// Never fails: decode problems become faults according to `policy`.
pub fn check_fp2e(record: &MeterRecord, policy: UnformedSerialPolicy) -> Fp2eOutcome {
    let code = match Fp2eCode::decode(&record.serial_number) {
        Ok(code) => code,
        Err(DecodeError::NotFp2e) => {
            return match policy {
                UnformedSerialPolicy::Conforming => Fp2eOutcome::default(),
                UnformedSerialPolicy::Fault => Fp2eOutcome::fault(Fault::Fp2eFormat),
            };
        }
        Err(DecodeError::Truncated) => return Fp2eOutcome::fault(Fault::Fp2eSerial),
    };

    let mut outcome = Fp2eOutcome::default();

    let year = record.manufacture_year.trim();
    if !is_all_digits(year) {
        outcome.faults.push(Fault::Fp2eYear);
    } else if code.year_digits != format!("{year:0>2}") {
        outcome.faults.push(Fault::Fp2eYear);
        outcome.corrections.push(Correction::new(
            Fault::Fp2eYear,
            CorrectionField::ManufactureYear,
            code.year_digits.clone(),
        ));
    }

    let expected = code.expected_diameters();
    let conforming = record
        .diameter
        .is_some_and(|value| expected.iter().any(|&d| f64::from(d) == value));
    if !conforming {
        outcome.faults.push(Fault::Fp2eDiameter);
        // G allows 60 or 65; the smaller value is proposed
        if let Some(proposed) = expected.iter().min() {
            outcome.corrections.push(Correction::new(
                Fault::Fp2eDiameter,
                CorrectionField::Diameter,
                proposed.to_string(),
            ));
        }
    }

    outcome
}
