//! One-token lookahead for parsers.
//!
//! [`Reader`] sits between a [`TokenSource`](runelex_core::TokenSource)
//! (normally a [`TokenStream`](runelex_core::TokenStream)) and hand-written
//! parsing code. It buffers at most one token, which is enough to peek
//! before committing to a grammar rule or to put back a token that turned
//! out to belong to the caller.

mod reader;

pub use reader::Reader;
