//! Delimiter detection for spreadsheet exports.
//!
//! French locales export with `;`, others with `,` or tabs. We look at the
//! first lines of the file and keep the candidate that splits them most
//! consistently.

/// Delimiter used when nothing better is found.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Number of leading bytes inspected when sniffing.
pub const SNIFF_SAMPLE_BYTES: usize = 2048;

const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];
const MAX_LINES: usize = 10;

/// Detects the field delimiter of a delimited-text sample.
///
/// Delimiters inside double-quoted fields are ignored. A candidate must
/// appear on the first line; the one matching that count on the most lines
/// wins, ties broken by higher per-line count.
pub fn sniff_delimiter(text: &str) -> u8 {
    let sample = sample_prefix(text);
    let truncated = sample.len() < text.len();
    let mut lines: Vec<&str> = sample.lines().filter(|line| !line.trim().is_empty()).collect();
    if truncated && lines.len() > 1 {
        // the last line may be cut mid-record
        lines.pop();
    }
    lines.truncate(MAX_LINES);

    let mut best: Option<(usize, usize, u8)> = None;
    for candidate in CANDIDATES {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_unquoted(line, candidate))
            .collect();
        let Some(&first) = counts.first() else {
            continue;
        };
        if first == 0 {
            continue;
        }
        let consistent = counts.iter().filter(|&&count| count == first).count();
        let score = (consistent, first, candidate);
        if best.is_none_or(|(c, f, _)| (consistent, first) > (c, f)) {
            best = Some(score);
        }
    }
    best.map_or(DEFAULT_DELIMITER, |(_, _, candidate)| candidate)
}

fn sample_prefix(text: &str) -> &str {
    if text.len() <= SNIFF_SAMPLE_BYTES {
        return text;
    }
    let mut end = SNIFF_SAMPLE_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}
