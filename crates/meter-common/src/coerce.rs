//! Null-safe coercions for untyped inventory cells.
//!
//! Every function here maps unparseable input to "missing" (an empty string
//! or `None`) and never fails.

use polars::prelude::AnyValue;

use crate::polars::{any_to_f64, any_to_string};

/// Literal that spreadsheet exports write for an empty numeric cell.
const NAN_LITERAL: &str = "nan";

/// Converts a cell to trimmed text, treating `nan` and blanks as missing (`""`).
pub fn normalize_text(value: AnyValue<'_>) -> String {
    let text = any_to_string(value);
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case(NAN_LITERAL) {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Coerces a cell to a finite number; anything else becomes `None`.
pub fn coerce_f64(value: AnyValue<'_>) -> Option<f64> {
    any_to_f64(value)
}

/// Normalizes a manufacture year to a zero-padded two-character string.
///
/// Numeric-looking input (digits with at most one `.`) drops its fractional
/// part first, so `2015.0` becomes `2015`. The last two characters are kept
/// and left-padded with `0`. Missing input stays missing.
///
/// # Examples
///
/// ```
/// use meter_common::normalize_year;
///
/// assert_eq!(normalize_year("2015"), "15");
/// assert_eq!(normalize_year("2015.0"), "15");
/// assert_eq!(normalize_year("7"), "07");
/// assert_eq!(normalize_year("nan"), "");
/// ```
pub fn normalize_year(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NAN_LITERAL) {
        return String::new();
    }
    let integral = if is_all_digits(&trimmed.replacen('.', "", 1)) {
        let head = trimmed.split('.').next().unwrap_or_default();
        let stripped = head.trim_start_matches('0');
        if stripped.is_empty() { "0" } else { stripped }
    } else {
        trimmed
    };
    let chars: Vec<char> = integral.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(2)..].iter().collect();
    format!("{tail:0>2}")
}

/// Returns true when `value` is non-empty and made only of ASCII digits.
pub fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}
