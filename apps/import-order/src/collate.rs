//! Locale-aware string comparison for module specifiers.
//!
//! Approximates root-locale collation as used by `localeCompare`:
//! - Primary: whitespace < punctuation/symbols < digits < letters.
//!   Punctuation follows the root collation order; letters compare
//!   case-insensitively; digits compare one character at a time.
//! - Tertiary: at the first primary tie with differing case, lowercase
//!   sorts first.
//! - Finally code point order, so distinct strings never compare equal.

use std::cmp::Ordering;

/// Punctuation and symbols in root collation order.
const PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Space,
    Punct,
    Other,
    Digit,
    Letter,
}

/// Primary weight of one character.
///
/// Accents are not folded: `é` weighs by its code point and sorts after `z`,
/// where `localeCompare` would place it with `e`. Specifiers are almost
/// always ASCII, so no collation tables are carried.
fn primary(ch: char) -> (Class, u32) {
    if ch.is_whitespace() {
        return (Class::Space, ch as u32);
    }
    if let Some(pos) = PUNCTUATION.find(ch) {
        return (Class::Punct, pos as u32);
    }
    if ch.is_ascii_digit() {
        return (Class::Digit, ch as u32);
    }
    if ch.is_alphabetic() {
        let folded = ch.to_lowercase().next().unwrap_or(ch);
        return (Class::Letter, folded as u32);
    }
    if ch.is_numeric() {
        return (Class::Digit, ch as u32);
    }
    (Class::Other, ch as u32)
}

/// Compare two specifiers the way a reader expects them sorted.
pub fn compare(a: &str, b: &str) -> Ordering {
    let pa = a.chars().map(primary);
    let pb = b.chars().map(primary);
    match pa.cmp(pb) {
        Ordering::Equal => {}
        other => return other,
    }
    // same primary sequence: first case difference decides, lowercase first
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => break,
        }
    }
    a.cmp(b)
}
