//! Text decoding for inventory exports.
//!
//! Spreadsheet tools on French Windows installs still save CSV as
//! Windows-1252. UTF-8 is tried first; anything that fails validation is
//! decoded as Windows-1252.

use std::path::Path;

use encoding_rs::WINDOWS_1252;

use crate::error::{IngestError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Encoding a file was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Windows1252,
}

/// Decodes raw file bytes into text.
///
/// UTF-16 byte-order marks are rejected rather than guessed.
pub fn decode_bytes(bytes: &[u8], path: &Path) -> Result<(String, SourceEncoding)> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok((text.to_string(), SourceEncoding::Utf8)),
        Err(_) => {
            let (text, _, had_errors) = WINDOWS_1252.decode(body);
            tracing::warn!(
                path = %path.display(),
                had_errors,
                "input is not valid UTF-8, decoded as Windows-1252"
            );
            Ok((text.into_owned(), SourceEncoding::Windows1252))
        }
    }
}
