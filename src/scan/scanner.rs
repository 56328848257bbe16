//! The literal block scan itself.
//!
//! Walks forward from the `expect` call token on the reported line: past the
//! call parenthesis, over whitespace and line comments, across an optional
//! per-call label, onto the opening marker, then character by character
//! through the content to the closing marker. Each structural violation has
//! its own failure reason so the author can fix the call site.

use super::errors::{ScanError, ScanErrorKind, ScanResult};
use super::region::LiteralRegion;

/// Identifier the scan anchors on.
pub const CALL_TOKEN: &str = "expect";
/// Opening marker of the literal block.
pub const OPENING_MARKER: &str = "r#\"";
/// Closing marker; must start a fresh line.
pub const CLOSING_MARKER: &str = "\"#";
/// Optional per-call label consumed between the call and the opening marker.
pub const PROMOTE_LABEL: &str = "promoted";

/// Locates the literal block following the `expect` call on `call_line`
/// (0-based index into `lines`).
pub fn locate_literal<'a>(lines: &'a [&'a str], call_line: usize) -> ScanResult<LiteralRegion<'a>> {
    let line = lines.get(call_line).ok_or_else(|| {
        ScanError::new(ScanErrorKind::CallNotFound, lines.len().max(1), 1)
    })?;

    let starts = call_starts(line);
    let cursor = match starts.as_slice() {
        [] => return Err(ScanError::new(ScanErrorKind::CallNotFound, call_line + 1, 1)),
        [only] => *only,
        [_, second, ..] => {
            return Err(ScanError::new(
                ScanErrorKind::AmbiguousCall,
                call_line + 1,
                second + 1,
            ))
        }
    };

    let (open_line, open_col) = find_opening(lines, call_line, cursor)?;
    let close_line = find_closing(lines, open_line, open_col + OPENING_MARKER.len())?;
    Ok(LiteralRegion::new(lines, open_line, close_line))
}

/// Byte positions just past the `(` of every call token on `line`. The
/// token must sit on an identifier boundary; whitespace may separate it
/// from its parenthesis.
fn call_starts(line: &str) -> Vec<usize> {
    let bytes = line.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i < line.len() {
        if line[i..].starts_with(CALL_TOKEN) && is_boundary(bytes, i) {
            let mut j = i + CALL_TOKEN.len();
            while j < line.len() && (bytes[j] == b' ' || bytes[j] == b'\t') {
                j += 1;
            }
            if j < line.len() && bytes[j] == b'(' {
                found.push(j + 1);
                i = j + 1;
                continue;
            }
        }
        i += utf8_width(bytes[i]);
    }
    found
}

fn is_boundary(bytes: &[u8], at: usize) -> bool {
    at == 0 || !(bytes[at - 1].is_ascii_alphanumeric() || bytes[at - 1] == b'_')
}

fn utf8_width(first_byte: u8) -> usize {
    match first_byte {
        b if b < 0x80 => 1,
        b if b < 0xE0 => 2,
        b if b < 0xF0 => 3,
        _ => 4,
    }
}

/// Advances from just past the call parenthesis to the opening marker,
/// skipping whitespace, `//` comments, and at most one label token. Any
/// other token, or a marker further than the next line, is a failure.
fn find_opening(lines: &[&str], call_line: usize, cursor: usize) -> ScanResult<(usize, usize)> {
    let mut row = call_line;
    let mut col = cursor;
    let mut label_seen = false;
    loop {
        let Some(line) = lines.get(row) else {
            return Err(ScanError::new(ScanErrorKind::OpeningNotFound, lines.len(), 1));
        };
        if col >= line.len() {
            row += 1;
            col = 0;
            continue;
        }
        let rest = &line[col..];
        if rest.starts_with(' ') || rest.starts_with('\t') || rest.starts_with('\r') {
            col += 1;
            continue;
        }
        if rest.starts_with("//") {
            col = line.len();
            continue;
        }
        if rest.starts_with(OPENING_MARKER) {
            if row > call_line + 1 {
                return Err(ScanError::new(ScanErrorKind::OpeningTooFar, row + 1, col + 1));
            }
            return Ok((row, col));
        }
        if !label_seen {
            if let Some(width) = label_width(rest) {
                label_seen = true;
                col += width;
                continue;
            }
        }
        return Err(ScanError::new(ScanErrorKind::OpeningNotFound, row + 1, col + 1));
    }
}

/// Width of a leading `promoted(` label, if present.
fn label_width(rest: &str) -> Option<usize> {
    if !rest.starts_with(PROMOTE_LABEL) {
        return None;
    }
    let bytes = rest.as_bytes();
    let mut j = PROMOTE_LABEL.len();
    if let Some(&b) = bytes.get(j) {
        if b.is_ascii_alphanumeric() || b == b'_' {
            return None;
        }
    }
    while j < rest.len() && (bytes[j] == b' ' || bytes[j] == b'\t') {
        j += 1;
    }
    if bytes.get(j) == Some(&b'(') {
        Some(j + 1)
    } else {
        None
    }
}

/// Scans the content character by character until the closing marker,
/// rejecting interpolation escapes on the way. Returns the 0-based line of
/// the closing marker.
fn find_closing(lines: &[&str], open_line: usize, start_col: usize) -> ScanResult<usize> {
    let mut row = open_line;
    let mut col = start_col;
    loop {
        let Some(line) = lines.get(row) else {
            return Err(ScanError::new(ScanErrorKind::ClosingNotFound, lines.len(), 1));
        };
        if col >= line.len() {
            row += 1;
            col = 0;
            continue;
        }
        let rest = &line[col..];
        if rest.starts_with(CLOSING_MARKER) {
            if row == open_line {
                return Err(ScanError::new(
                    ScanErrorKind::ClosingOnOpeningLine,
                    row + 1,
                    col + 1,
                ));
            }
            if !line[..col].trim().is_empty() {
                return Err(ScanError::new(
                    ScanErrorKind::ClosingOnContentLine,
                    row + 1,
                    col + 1,
                ));
            }
            return Ok(row);
        }
        if rest.starts_with('$') {
            if let Some(next) = rest.chars().nth(1) {
                if next == '{' || next == '_' || next.is_alphabetic() {
                    return Err(ScanError::new(
                        ScanErrorKind::InterpolationInContent,
                        row + 1,
                        col + 1,
                    ));
                }
            }
        }
        col += rest.chars().next().map(char::len_utf8).unwrap_or(1);
    }
}
