//! Logical-length arithmetic.
//!
//! Entity offsets are expressed in UTF-16 code units, so an astral code
//! point (a surrogate pair) counts as 2. Text is stored as UTF-8; these
//! helpers translate between the two.

/// Length of a string in UTF-16 code units.
#[must_use]
pub fn utf16_len(s: &str) -> usize {
    if s.is_ascii() {
        return s.len();
    }
    s.chars().map(char::len_utf16).sum()
}

/// Byte index of the character that contains UTF-16 position `unit`.
///
/// A position inside a surrogate pair snaps down to the start of that
/// character. Positions past the end map to `s.len()`.
#[must_use]
pub fn utf16_to_byte(s: &str, unit: usize) -> usize {
    if s.is_ascii() {
        return unit.min(s.len());
    }
    let mut units = 0;
    for (idx, ch) in s.char_indices() {
        let next = units + ch.len_utf16();
        if next > unit {
            return idx;
        }
        units = next;
    }
    s.len()
}

/// Slice `s` between two UTF-16 positions.
///
/// Both ends are clamped and snapped like [`utf16_to_byte`]; an inverted
/// range yields an empty slice.
#[must_use]
pub fn slice_utf16(s: &str, start: usize, end: usize) -> &str {
    let from = utf16_to_byte(s, start);
    let to = utf16_to_byte(s, end).max(from);
    &s[from..to]
}

/// Split `s` into the parts before, inside and after `[start, end)`.
#[must_use]
pub fn split3_utf16(s: &str, start: usize, end: usize) -> (&str, &str, &str) {
    let a = utf16_to_byte(s, start);
    let b = utf16_to_byte(s, end).max(a);
    (&s[..a], &s[a..b], &s[b..])
}
