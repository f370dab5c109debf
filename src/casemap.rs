//! IRC case-mapping functions.
//!
//! IRC comparisons use the `rfc1459` case mapping, where in addition to
//! ASCII case folding the characters `[]\~` are considered equivalent to
//! `{}|^`. Channel and nickname lookups must use this mapping.

/// Fold one character per the RFC 1459 case mapping.
#[inline]
fn fold(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => c.to_ascii_lowercase(),
        _ => c,
    }
}

/// Convert a string to IRC lowercase using the RFC 1459 case mapping.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(fold).collect()
}

/// Compare two strings using IRC case-insensitive comparison.
pub fn irc_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.chars().zip(b.chars()).all(|(ca, cb)| fold(ca) == fold(cb))
}
