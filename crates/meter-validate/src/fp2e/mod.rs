//! FP2E numbering standard.
//!
//! An FP2E serial reads `L YY LL NNNNNN`: a manufacturer letter, the
//! two-digit manufacture year, two letters (the second encodes the nominal
//! diameter class) and a six-digit sequence number.

mod checker;
mod decoder;

pub use checker::{Fp2eOutcome, UnformedSerialPolicy, check_fp2e};
pub use decoder::{DecodeError, Fp2eCode, expected_diameters, is_fp2e_formed};
