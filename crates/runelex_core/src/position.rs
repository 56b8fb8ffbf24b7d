//! Line and column lookup for byte offsets.
//!
//! Both queries scan the input prefix, so they are O(offset). They are
//! meant for diagnostics, not for per-token bookkeeping.

use std::fmt;

/// Human-readable location: input name plus 1-based line and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position<'a> {
    pub name: &'a str,
    pub line: usize,
    pub column: usize,
}

impl<'a> Position<'a> {
    /// Resolve `offset` within `input`. Offsets past the end are clamped.
    pub fn resolve(name: &'a str, input: &str, offset: usize) -> Self {
        Position {
            name,
            line: line_number(input, offset),
            column: column_number(input, offset),
        }
    }
}

impl fmt::Display for Position<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "<input>"
        } else {
            self.name
        };
        write!(f, "{name}:{}:{}", self.line, self.column)
    }
}

fn prefix(input: &str, offset: usize) -> &[u8] {
    let bytes = input.as_bytes();
    &bytes[..offset.min(bytes.len())]
}

/// 1-based line containing `offset`.
pub fn line_number(input: &str, offset: usize) -> usize {
    1 + memchr::memchr_iter(b'\n', prefix(input, offset)).count()
}

/// 1-based byte column of `offset` within its line.
pub fn column_number(input: &str, offset: usize) -> usize {
    let code = prefix(input, offset);
    match memchr::memrchr(b'\n', code) {
        Some(newline) => code.len() - newline,
        None => code.len() + 1,
    }
}
