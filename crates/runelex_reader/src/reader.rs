//! Token reader with a single pushback slot.

use runelex_core::{Position, Token, TokenSource, Type};
use tracing::trace;

/// Wraps a token source with exactly one token of lookahead.
///
/// Not meant to be shared: one reader per stream, owned by one parser.
#[derive(Debug)]
pub struct Reader<S> {
    source: S,
    /// Token already pulled from `source` but not yet handed out.
    buf: Option<Token>,
}

impl<S: TokenSource> Reader<S> {
    pub fn new(source: S) -> Self {
        Reader { source, buf: None }
    }

    /// Look at the next token without consuming it.
    ///
    /// Repeated calls return the same token until [`next`](Iterator::next)
    /// takes it. `None` once the source is exhausted.
    pub fn peek(&mut self) -> Option<&Token> {
        if self.buf.is_none() {
            self.buf = self.source.next_token();
        }
        self.buf.as_ref()
    }

    /// Type of the next token, if any. Shorthand for `peek().map(|t| t.kind)`.
    pub fn peek_kind(&mut self) -> Option<Type> {
        self.peek().map(|t| t.kind)
    }

    /// Make `token` the next one returned.
    ///
    /// # Panics
    ///
    /// Panics if a token is already buffered, including one buffered by
    /// [`peek`](Self::peek). Lookahead is one token deep.
    pub fn backup(&mut self, token: Token) {
        if let Some(held) = &self.buf {
            panic!("cannot backup more than one token (holding {held}, got {token})");
        }
        trace!(kind = %token.kind, pos = token.pos, "backup");
        self.buf = Some(token);
    }

    /// Read one token per entry of `types`, stopping at the first token
    /// whose type differs or when the source runs dry.
    ///
    /// Returns the tokens actually read (the mismatching one included,
    /// last) and whether every expected type matched. Nothing is pushed
    /// back on failure.
    pub fn expect(&mut self, types: &[Type]) -> (Vec<Token>, bool) {
        let mut tokens = Vec::with_capacity(types.len());
        for &expected in types {
            let Some(token) = self.next() else {
                return (tokens, false);
            };
            let matched = token.kind == expected;
            tokens.push(token);
            if !matched {
                trace!(%expected, read = tokens.len(), "expect failed");
                return (tokens, false);
            }
        }
        (tokens, true)
    }

    /// Name, line, and column of the last token pulled from the source.
    ///
    /// A token sitting in the pushback slot has already been pulled, so
    /// after a `peek` this reports the peeked token.
    pub fn pos_info(&self) -> Position<'_> {
        self.source.position()
    }

    /// Drop the buffered token and drain the source, releasing its producer.
    /// Returns how many tokens were discarded.
    pub fn drain(&mut self) -> usize {
        usize::from(self.buf.take().is_some()) + self.source.drain()
    }

    /// Give back the source. A buffered token is lost.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: TokenSource> Iterator for Reader<S> {
    type Item = Token;

    /// The buffered token if there is one, otherwise a fresh one from the
    /// source.
    fn next(&mut self) -> Option<Token> {
        self.buf.take().or_else(|| self.source.next_token())
    }
}

#[cfg(test)]
mod tests;
