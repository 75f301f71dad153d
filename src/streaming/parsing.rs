//! Zero-allocation scanning of raw evidence lines.
//!
//! The traversal only needs a record's locus to decide whether it falls in
//! a requested interval; these helpers find it without splitting the line
//! or decoding the remaining columns.

use crate::evidence::EvidenceKind;
use memchr::memchr;

/// Fast u64 parsing - no allocation, no error formatting.
///
/// Returns None if the input is empty, contains non-digit characters or
/// does not fit in a u64.
#[inline(always)]
pub fn parse_u64_fast(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u64)?;
    }
    Some(n)
}

/// Strip a trailing `\n` or `\r\n`.
#[inline(always)]
pub fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Return the `n`th (0-based) tab-separated column of a line.
#[inline]
fn column(line: &[u8], n: usize) -> Option<&[u8]> {
    let mut rest = line;
    for _ in 0..n {
        let tab = memchr(b'\t', rest)?;
        rest = &rest[tab + 1..];
    }
    let end = memchr(b'\t', rest).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Scan the locus of a raw line of the given kind.
///
/// Returns (contig, start, end) as a 0-based half-open span, or None if
/// the locus columns are missing or not numeric.
#[inline]
pub fn scan_locus(kind: EvidenceKind, line: &[u8]) -> Option<(&[u8], u64, u64)> {
    let tab1 = memchr(b'\t', line)?;
    let contig = &line[..tab1];

    let rest = &line[tab1 + 1..];
    let start_len = memchr(b'\t', rest).unwrap_or(rest.len());
    let start = parse_u64_fast(&rest[..start_len])?;

    let end = match kind.end_column() {
        Some(col) => parse_u64_fast(column(line, col)?)?,
        None => start.saturating_add(1),
    };

    Some((contig, start, end))
}

/// Check if a first line is a header rather than a record.
///
/// A header either starts with `#` or is a row of column names: its
/// position column holds no digits at all. A position column that is
/// merely malformed (`1O0`) marks a bad record, not a header.
#[inline]
pub fn is_header_line(line: &[u8]) -> bool {
    if line.first() == Some(&b'#') {
        return true;
    }
    match column(line, 1) {
        Some(position) => !position.is_empty() && !position.iter().any(u8::is_ascii_digit),
        None => false,
    }
}
