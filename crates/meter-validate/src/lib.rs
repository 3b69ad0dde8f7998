//! Rule engine for water-meter inventories.
//!
//! Data flows leaf-first:
//!
//! - [`fp2e::Fp2eCode`] decodes an FP2E serial into manufacture year and
//!   diameter class.
//! - [`fp2e::check_fp2e`] cross-checks a record's declared year and diameter
//!   against its decoded serial.
//! - [`rules::RuleSet`] holds the ordered, declarative rule list of one
//!   inventory variant (radio, remote, manual).
//! - [`Validator`] normalizes a `DataFrame`, runs the rule set and the FP2E
//!   stage, and returns the anomaly subset with its fault frequencies.

pub mod error;
pub mod fp2e;
pub mod outcome;
pub mod records;
pub mod rules;
pub mod validator;

pub use error::{Result, ValidateError};
pub use fp2e::{DecodeError, Fp2eCode, Fp2eOutcome, UnformedSerialPolicy, check_fp2e};
pub use outcome::{AnomalyRow, AnomalySet, FaultCount, FaultFrequencyTable, ValidationOutcome};
pub use records::{extract_records, missing_columns};
pub use rules::{Fp2eStage, Rule, RuleSet};
pub use validator::{Validator, ValidatorOptions, validate};
