//! Token and token-type model.
//!
//! [`Type`] is an open-ended integer tag. The core reserves the values
//! below [`Type::FIRST_FREE`] and never looks at anything above it.

use std::fmt;

/// Kind of a token.
///
/// Only [`Type::ERROR`] and [`Type::EOF`] are predefined. Callers declare
/// their own kinds from [`Type::FIRST_FREE`] upward:
///
/// ```text
/// const INT: Type = Type::user(0);
/// const OP: Type = Type::user(1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Type(pub u32);

impl Type {
    /// The token value is a diagnostic message, not input text.
    pub const ERROR: Type = Type(0);
    /// End of input. Last reserved value.
    pub const EOF: Type = Type(1);
    /// First value available to callers.
    pub const FIRST_FREE: Type = Type(Self::EOF.0 + 1);

    /// The `n`th caller-defined type, counted from [`Type::FIRST_FREE`].
    #[inline]
    pub const fn user(n: u32) -> Type {
        Type(Self::FIRST_FREE.0 + n)
    }

    /// Returns `true` for the types owned by the core.
    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0 < Self::FIRST_FREE.0
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Type::ERROR => f.write_str("Error"),
            Type::EOF => f.write_str("EOF"),
            Type(n) => write!(f, "Type({n})"),
        }
    }
}

/// A typed, positioned piece of input produced by the scanner.
///
/// For [`Type::ERROR`] tokens `value` holds the error message and `pos`
/// the start of the token that was being scanned when the error was raised.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: Type,
    /// Byte offset into the input.
    pub pos: usize,
    pub value: String,
}

impl Token {
    pub fn new(kind: Type, pos: usize, value: impl Into<String>) -> Self {
        Token {
            kind,
            pos,
            value: value.into(),
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == Type::ERROR
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == Type::EOF
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Type::EOF => f.write_str("EOF"),
            Type::ERROR => write!(f, "error at {}: {}", self.pos, self.value),
            kind => write!(f, "{kind} {:?}", self.value),
        }
    }
}
