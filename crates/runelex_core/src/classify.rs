//! Character classes commonly needed by state functions.
//!
//! The `&str` sets plug into [`Scanner::accept`](crate::Scanner::accept)
//! and friends; the predicates plug into the `*_func` variants.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Horizontal whitespace.
pub const SPACE: &str = " \t";
/// Line terminators.
pub const ENDLINE: &str = "\r\n";
/// Quote characters.
pub const QUOTE: &str = "\"'`";

#[inline]
pub fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[inline]
pub fn is_endline(c: char) -> bool {
    c == '\r' || c == '\n'
}

/// Underscore, letter (`L*`) or decimal digit (`Nd`).
///
/// Other numerics such as `'²'`, `'½'` or `'Ⅲ'` are not identifier runes.
#[inline]
pub fn is_alphanumeric(c: char) -> bool {
    if c == '_' || c.is_ascii_alphanumeric() {
        return true;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

#[inline]
pub fn is_quote(c: char) -> bool {
    c == '"' || c == '\'' || c == '`'
}
