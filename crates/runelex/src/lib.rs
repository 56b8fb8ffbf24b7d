//! Building blocks for hand-written lexers and parsers.
//!
//! Re-exports the scanner and driver from `runelex_core` and the lookahead
//! [`Reader`] from `runelex_reader`.
//!
//! # Usage
//!
//! ```text
//! const INT: Type = Type::user(0);
//!
//! fn lex_ints(s: &mut Scanner) -> Option<StateFn> {
//!     if s.accept_run("0123456789") == 0 {
//!         s.emit(Type::EOF);
//!         return None;
//!     }
//!     s.emit(INT);
//!     Some(StateFn(lex_ints))
//! }
//!
//! let mut reader = Reader::new(lex("numbers", "123", StateFn(lex_ints)));
//! ```
//!
//! # Logging
//!
//! Everything logs through `tracing`. Call [`init_tracing`] once to print
//! events to stderr when `RUST_LOG` is set, e.g.
//! `RUST_LOG=runelex_core=trace` to see every emitted token.

use std::sync::Once;

pub use runelex_core::{
    column_number, is_alphanumeric, is_endline, is_quote, is_space, lex, line_number,
    DriverConfig, LexError, Position, Scanner, State, StateFn, Token, TokenSource, TokenStream,
    Type, ENDLINE, QUOTE, SPACE,
};
pub use runelex_reader::Reader;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call multiple times; only
/// the first call has an effect. Applications that already install their
/// own subscriber should not call this.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            if installed.is_err() {
                tracing::debug!("a global tracing subscriber is already set");
            }
        }
    });
}
