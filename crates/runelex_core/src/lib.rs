//! Scanning foundation for hand-written lexers.
//!
//! A [`Scanner`] walks an immutable input one rune at a time. Lexing logic
//! lives in caller-supplied [`State`] values: each step inspects the scanner,
//! emits zero or more [`Token`]s, and returns the next state (or `None` to
//! finish). [`Scanner::run`] drives the state machine and closes the
//! [`TokenStream`] when it ends.
//!
//! Emission is a blocking rendezvous: the driver runs on its own thread and
//! hands over one token at a time to whoever holds the stream.
//!
//! ```text
//! let mut stream = runelex_core::lex("calc", "12+3", StateFn(lex_expr));
//! while let Some(token) = stream.next_token() {
//!     // ...
//! }
//! ```
//!
//! The crate reserves two token types ([`Type::ERROR`] and [`Type::EOF`]);
//! everything from [`Type::FIRST_FREE`] upward belongs to the caller.

mod classify;
mod config;
mod error;
mod position;
mod scanner;
mod stream;
mod token;

pub use classify::{is_alphanumeric, is_endline, is_quote, is_space, ENDLINE, QUOTE, SPACE};
pub use config::DriverConfig;
pub use error::LexError;
pub use position::{column_number, line_number, Position};
pub use scanner::{lex, Scanner, State, StateFn};
pub use stream::{TokenSource, TokenStream};
pub use token::{Token, Type};
