pub mod brand;
pub mod columns;
pub mod error;
pub mod fault;
pub mod lookup;
pub mod record;
pub mod variant;

pub use brand::{Brand, ReadMode};
pub use error::{ModelError, Result};
pub use fault::{Correction, CorrectionField, FAULT_SEPARATOR, Fault, join_faults};
pub use lookup::CaseInsensitiveLookup;
pub use record::MeterRecord;
pub use variant::Variant;
