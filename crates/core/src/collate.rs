//! Locale-aware string ordering for household ids.
//!
//! We approximate the Unicode root collation with a four-level comparison over
//! the NFKD form of each string:
//!
//! 1. base characters, case-folded, grouped so that whitespace sorts before
//!    punctuation, then symbols, digits, alphabetic scripts and finally Han
//!    ideographs;
//! 2. accents;
//! 3. case, lowercase first;
//! 4. code points, so that distinct strings never compare equal.
//!
//! Han ideographs are ordered by code point, not by pinyin. As with the
//! implicit weights of the root collation, the core CJK Unified Ideographs
//! block sorts ahead of the extension blocks (Extension A onwards).

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
    Ideograph,
    ExtendedIdeograph,
}

const PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`";

fn is_core_han(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}')
}

fn is_extended_han(c: char) -> bool {
    matches!(c, '\u{3400}'..='\u{4DBF}' | '\u{20000}'..='\u{323AF}')
}

fn class_of(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_numeric() {
        CharClass::Digit
    } else if is_core_han(c) {
        CharClass::Ideograph
    } else if is_extended_han(c) {
        CharClass::ExtendedIdeograph
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else if PUNCTUATION.contains(c) || ('\u{3000}'..='\u{303F}').contains(&c) {
        CharClass::Punctuation
    } else {
        CharClass::Symbol
    }
}

fn base_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfkd().filter(|c| !is_combining_mark(*c))
}

fn primary(s: &str) -> impl Iterator<Item = (CharClass, char)> + '_ {
    base_chars(s)
        .flat_map(char::to_lowercase)
        .map(|c| (class_of(c), c))
}

fn secondary(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfkd().flat_map(char::to_lowercase)
}

fn tertiary(s: &str) -> impl Iterator<Item = bool> + '_ {
    base_chars(s).map(char::is_uppercase)
}

/// Compare two strings the way a locale collator would.
///
/// The order is total and consistent: it only returns `Equal` for identical
/// strings.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary(a)
        .cmp(primary(b))
        .then_with(|| secondary(a).cmp(secondary(b)))
        .then_with(|| tertiary(a).cmp(tertiary(b)))
        .then_with(|| a.cmp(b))
}
