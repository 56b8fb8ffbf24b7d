//! Consumer side of the token channel.

use std::sync::Arc;

use crossbeam::channel::Receiver;
use tracing::{debug, trace};

use crate::position::{column_number, line_number, Position};
use crate::token::Token;

/// A pull-based source of tokens with positions for diagnostics.
///
/// [`TokenStream`] is the production implementation; parsers can be tested
/// against any other implementation that replays a fixed token list.
pub trait TokenSource {
    /// Next token, or `None` once the source is exhausted.
    fn next_token(&mut self) -> Option<Token>;

    /// Location of the last token returned by [`next_token`](Self::next_token).
    fn position(&self) -> Position<'_>;

    /// Discard everything left; returns how many tokens were dropped.
    fn drain(&mut self) -> usize {
        let mut dropped = 0;
        while self.next_token().is_some() {
            dropped += 1;
        }
        dropped
    }
}

/// Receiving half of a lexer, created by [`Scanner::new`](crate::Scanner::new)
/// or [`lex`](crate::lex).
///
/// # Blocking
///
/// [`next_token`](Self::next_token) waits for the driver to emit. If the
/// driver was never started it waits forever. Conversely, the driver waits
/// in `emit` until the token is taken: a consumer that stops reading while
/// keeping the stream alive leaves the driver thread parked for good. Call
/// [`drain`](Self::drain), or drop the stream, when giving up early.
#[derive(Debug)]
pub struct TokenStream {
    name: Arc<str>,
    input: Arc<str>,
    tokens: Receiver<Token>,
    /// Position of the last token handed out, for line/column queries.
    last_pos: usize,
    closed: bool,
}

impl TokenStream {
    pub(crate) fn new(name: Arc<str>, input: Arc<str>, tokens: Receiver<Token>) -> Self {
        TokenStream {
            name,
            input,
            tokens,
            last_pos: 0,
            closed: false,
        }
    }

    /// Block until the next token arrives.
    ///
    /// Returns `None` once the driver has finished; from then on every call
    /// returns `None` immediately.
    pub fn next_token(&mut self) -> Option<Token> {
        if self.closed {
            return None;
        }
        if let Ok(token) = self.tokens.recv() {
            trace!(kind = %token.kind, pos = token.pos, "received");
            self.last_pos = token.pos;
            Some(token)
        } else {
            debug!(name = %self.name, "token stream closed");
            self.closed = true;
            None
        }
    }

    /// Discard tokens until the driver finishes, releasing it if it is
    /// blocked in `emit`. Returns the number of tokens discarded.
    pub fn drain(&mut self) -> usize {
        let dropped = self.tokens.iter().count();
        self.closed = true;
        debug!(name = %self.name, dropped, "drained token stream");
        dropped
    }

    /// Whether the driver has closed the stream and it has been observed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Line of the last token returned by [`next_token`](Self::next_token).
    pub fn line_number(&self) -> usize {
        line_number(&self.input, self.last_pos)
    }

    /// Column of the last token returned by [`next_token`](Self::next_token).
    pub fn column_number(&self) -> usize {
        column_number(&self.input, self.last_pos)
    }

    pub fn position(&self) -> Position<'_> {
        Position::resolve(&self.name, &self.input, self.last_pos)
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Option<Token> {
        TokenStream::next_token(self)
    }

    fn position(&self) -> Position<'_> {
        TokenStream::position(self)
    }

    fn drain(&mut self) -> usize {
        TokenStream::drain(self)
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
