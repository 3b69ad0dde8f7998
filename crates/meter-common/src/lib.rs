//! Shared utilities for meter inventory crates.
//!
//! This crate provides Polars `AnyValue` helpers and the null-safe coercions
//! the validator applies to untyped inventory columns.

pub mod coerce;
pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use coerce::{coerce_f64, is_all_digits, normalize_text, normalize_year};
pub use polars::{any_to_f64, any_to_string, format_numeric, parse_f64};
