//! Low-level byte scanning primitives
//!
//! A string- and escape-aware depth counter replaces pattern matching for
//! locating complete bracket-delimited literals, so cell text containing
//! `]` or `[` never confuses the row scanner.

use memchr::memmem;

/// Outcome of searching the buffered prefix for the data section marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerScan {
    /// Marker text not present; wait for more bytes.
    NotFound,
    /// Marker key found but the bytes after it are not all buffered yet.
    Incomplete,
    /// Marker complete; index of the data array's opening `[`.
    Found { array_open: usize },
}

/// Search `buf` for the section marker: the given key followed by optional
/// whitespace, `:`, optional whitespace and `[`. First occurrence wins;
/// identical text earlier in the metadata is a documented false positive.
pub(crate) fn find_marker(buf: &[u8], key: &memmem::Finder<'_>) -> MarkerScan {
    let mut incomplete = false;
    for hit in key.find_iter(buf) {
        let mut pos = hit + key.needle().len();
        match expect_after_key(buf, &mut pos) {
            AfterKey::ArrayOpen => return MarkerScan::Found { array_open: pos },
            AfterKey::NeedMoreBytes => incomplete = true,
            AfterKey::NotMarker => {}
        }
    }
    if incomplete {
        MarkerScan::Incomplete
    } else {
        MarkerScan::NotFound
    }
}

enum AfterKey {
    ArrayOpen,
    NeedMoreBytes,
    NotMarker,
}

fn expect_after_key(buf: &[u8], pos: &mut usize) -> AfterKey {
    match next_significant(buf, pos) {
        Some(b':') => {}
        Some(_) => return AfterKey::NotMarker,
        None => return AfterKey::NeedMoreBytes,
    }
    *pos += 1;
    match next_significant(buf, pos) {
        Some(b'[') => AfterKey::ArrayOpen,
        Some(_) => AfterKey::NotMarker,
        None => AfterKey::NeedMoreBytes,
    }
}

/// Advance `pos` past JSON whitespace; return the first significant byte.
pub(crate) fn next_significant(buf: &[u8], pos: &mut usize) -> Option<u8> {
    while let Some(&b) = buf.get(*pos) {
        if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
            *pos += 1;
        } else {
            return Some(b);
        }
    }
    None
}

/// Given `buf[start] == b'['`, find the index of the matching `]`.
///
/// Tracks bracket depth and string state (with escape handling) so that
/// brackets inside string cells are ignored. Returns `None` when the close
/// bracket has not arrived yet.
pub(crate) fn find_array_end(buf: &[u8], start: usize) -> Option<usize> {
    debug_assert_eq!(buf.get(start), Some(&b'['));
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in buf.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
