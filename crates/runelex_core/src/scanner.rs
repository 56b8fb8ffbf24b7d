//! Rune scanner and state-machine driver.
//!
//! The [`Scanner`] owns the cursor and the sending half of the token
//! channel. All cursor primitives are synchronous; only [`Scanner::emit`]
//! and [`Scanner::errorf`] can block, waiting for the consumer to take the
//! token.
//!
//! # Cursor invariant
//!
//! `start <= pos <= input.len()`, and both sit on `char` boundaries.
//! `width` records the size of the last [`Scanner::next`] and is consumed
//! by exactly one [`Scanner::backup`]. Any other cursor movement clears it.

use std::fmt;
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{self, Sender};
use tracing::{debug, trace};

use crate::stream::TokenStream;
use crate::token::{Token, Type};

/// One step of a lexer state machine.
///
/// `step` does some scanning, then names the state to run next, or returns
/// `None` to stop. Implement it on an enum to dispatch by variant, or use
/// [`StateFn`] to chain plain functions.
pub trait State: Sized {
    fn step(self, scanner: &mut Scanner) -> Option<Self>;
}

/// A state expressed as a function pointer returning the next function.
///
/// ```text
/// fn lex_text(s: &mut Scanner) -> Option<StateFn> {
///     s.accept_run("abc");
///     s.emit(TEXT);
///     Some(StateFn(lex_end))
/// }
/// ```
#[derive(Clone, Copy)]
pub struct StateFn(pub fn(&mut Scanner) -> Option<StateFn>);

impl State for StateFn {
    #[inline]
    fn step(self, scanner: &mut Scanner) -> Option<Self> {
        (self.0)(scanner)
    }
}

impl fmt::Debug for StateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateFn(..)")
    }
}

/// Producer side of a lexer: input, cursor, and token sender.
pub struct Scanner {
    name: Arc<str>,
    input: Arc<str>,
    /// Cursor.
    pos: usize,
    /// Start of the pending (not yet emitted) token.
    start: usize,
    /// Width of the last `next()`, until a `backup()` consumes it.
    width: Option<usize>,
    tokens: Sender<Token>,
    /// The consumer dropped its `TokenStream`.
    disconnected: bool,
}

impl Scanner {
    /// Create a scanner and the stream its tokens will arrive on.
    ///
    /// Nothing is scanned until [`Scanner::run`] is called, and because the
    /// channel is a rendezvous, `run` must execute on a different thread
    /// than the one reading the stream. [`lex`] does both.
    pub fn new(name: impl Into<Arc<str>>, input: impl Into<Arc<str>>) -> (Scanner, TokenStream) {
        let name = name.into();
        let input = input.into();
        let (tx, rx) = channel::bounded(0);
        let scanner = Scanner {
            name: Arc::clone(&name),
            input: Arc::clone(&input),
            pos: 0,
            start: 0,
            width: None,
            tokens: tx,
            disconnected: false,
        };
        (scanner, TokenStream::new(name, input, rx))
    }

    /// Run the state machine from `initial` until a state returns `None`,
    /// then close the token stream.
    ///
    /// The driver also stops early, before the next step, once the consumer
    /// has dropped its [`TokenStream`].
    pub fn run<S: State>(mut self, initial: S) {
        let _span = tracing::debug_span!("lex", name = %self.name).entered();
        debug!(len = self.input.len(), "driver started");
        let mut steps: u64 = 0;
        let mut state = Some(initial);
        while let Some(current) = state {
            if self.disconnected {
                debug!(steps, "token stream dropped, stopping early");
                break;
            }
            state = current.step(&mut self);
            steps += 1;
        }
        debug!(steps, pos = self.pos, "driver finished, closing token stream");
        // Dropping `self` drops the sender, which closes the channel.
    }

    // ─── Accessors ──────────────────────────────────────────────────────

    /// Diagnostic name of the input.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The whole input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Cursor offset in bytes.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Offset where the pending token starts.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Text scanned since the last `emit` or `ignore`.
    pub fn pending(&self) -> &str {
        &self.input[self.start..self.pos]
    }

    /// Byte length of [`pending`](Self::pending).
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pos - self.start
    }

    /// Input from `pos + n` to the end. Empty if that lies past the end
    /// or inside a rune.
    pub fn rest_after(&self, n: usize) -> &str {
        self.pos
            .checked_add(n)
            .and_then(|at| self.input.get(at..))
            .unwrap_or("")
    }

    /// Whether the consumer has gone away.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    // ─── Rune primitives ────────────────────────────────────────────────

    /// Read the next rune and advance past it.
    ///
    /// Returns `None` at end of input. Either way the width read (zero at
    /// the end) is remembered for one [`backup`](Self::backup).
    #[allow(
        clippy::should_implement_trait,
        reason = "rune cursor, not an iterator: pairs with backup()"
    )]
    pub fn next(&mut self) -> Option<char> {
        let Some(c) = self.input[self.pos..].chars().next() else {
            self.width = Some(0);
            return None;
        };
        let width = c.len_utf8();
        self.width = Some(width);
        self.pos += width;
        Some(c)
    }

    /// Return the next rune without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        let c = self.next();
        self.backup();
        c
    }

    /// Step back over the rune returned by the last [`next`](Self::next).
    ///
    /// # Panics
    ///
    /// Panics unless the previous cursor operation was `next()` (directly
    /// or through a successful `accept*`). Two backups in a row would break
    /// the cursor invariant.
    pub fn backup(&mut self) {
        let Some(width) = self.width.take() else {
            panic!("backup called without a preceding next (at offset {})", self.pos);
        };
        self.pos -= width;
    }

    /// Move the cursor `n` bytes forward.
    ///
    /// # Panics
    ///
    /// Panics if the new position is past the end or inside a rune.
    pub fn advance(&mut self, n: usize) {
        let Some(to) = self
            .pos
            .checked_add(n)
            .filter(|&to| self.input.is_char_boundary(to))
        else {
            panic!(
                "advance by {n} from {} leaves the input or splits a rune",
                self.pos
            );
        };
        self.pos = to;
        self.width = None;
    }

    /// Move the cursor `n` bytes back.
    ///
    /// # Panics
    ///
    /// Panics if the new position precedes the pending token's start or
    /// lands inside a rune.
    pub fn retreat(&mut self, n: usize) {
        assert!(
            n <= self.pos - self.start,
            "retreat by {n} from {} crosses the token start {}",
            self.pos,
            self.start
        );
        let to = self.pos - n;
        assert!(
            self.input.is_char_boundary(to),
            "retreat by {n} from {} splits a rune",
            self.pos
        );
        self.pos = to;
        self.width = None;
    }

    // ─── Accept family ──────────────────────────────────────────────────

    /// Consume the next rune if it is in `valid`.
    pub fn accept(&mut self, valid: &str) -> bool {
        self.accept_func(|c| valid.contains(c))
    }

    /// Consume a run of runes from `valid`; returns the bytes consumed.
    pub fn accept_run(&mut self, valid: &str) -> usize {
        self.accept_func_run(|c| valid.contains(c))
    }

    /// Consume the next rune if `pred` holds for it.
    pub fn accept_func(&mut self, mut pred: impl FnMut(char) -> bool) -> bool {
        match self.next() {
            Some(c) if pred(c) => true,
            _ => {
                self.backup();
                false
            }
        }
    }

    /// Consume runes while `pred` holds; returns the bytes consumed.
    pub fn accept_func_run(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let from = self.pos;
        while matches!(self.next(), Some(c) if pred(c)) {}
        self.backup();
        self.pos - from
    }

    /// Consume the next rune if it is *not* in `invalid`. End of input is
    /// never consumed.
    pub fn accept_but(&mut self, invalid: &str) -> bool {
        self.accept_func(|c| !invalid.contains(c))
    }

    /// Consume runes up to the first one in `invalid` or the end of input;
    /// returns the bytes consumed.
    pub fn accept_but_run(&mut self, invalid: &str) -> usize {
        self.accept_func_run(|c| !invalid.contains(c))
    }

    /// Consume exactly `literal`, or nothing at all.
    pub fn consume(&mut self, literal: &str) -> bool {
        if !self.has_prefix(literal) {
            return false;
        }
        self.pos += literal.len();
        self.width = None;
        true
    }

    /// Whether the remaining input starts with `s`. Does not consume.
    pub fn has_prefix(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    /// Whether the input `after` bytes past the cursor starts with `s`.
    /// Does not consume.
    pub fn has_prefix_after(&self, after: usize, s: &str) -> bool {
        self.pos
            .checked_add(after)
            .and_then(|at| self.input.get(at..))
            .is_some_and(|rest| rest.starts_with(s))
    }

    // ─── Emission ───────────────────────────────────────────────────────

    /// Hand the pending text to the consumer as a token of type `kind`.
    ///
    /// Blocks until the consumer takes it.
    pub fn emit(&mut self, kind: Type) {
        let token = Token::new(kind, self.start, &self.input[self.start..self.pos]);
        self.start = self.pos;
        self.width = None;
        self.send(token);
    }

    /// Drop the pending text without emitting it.
    pub fn ignore(&mut self) {
        self.start = self.pos;
        self.width = None;
    }

    /// Emit an error token carrying the formatted message and stop.
    ///
    /// Return its result straight from a state function:
    ///
    /// ```text
    /// return s.errorf(format_args!("unexpected {c:?}"));
    /// ```
    pub fn errorf<S>(&mut self, args: fmt::Arguments<'_>) -> Option<S> {
        let token = Token::new(Type::ERROR, self.start, fmt::format(args));
        debug!(pos = token.pos, message = %token.value, "error token");
        self.send(token);
        None
    }

    fn send(&mut self, token: Token) {
        if self.disconnected {
            return;
        }
        trace!(kind = %token.kind, pos = token.pos, value = ?token.value, "emit");
        if self.tokens.send(token).is_err() {
            debug!("token stream dropped, discarding output");
            self.disconnected = true;
        }
    }
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("name", &self.name)
            .field("pos", &self.pos)
            .field("start", &self.start)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// Create a scanner over `input` and run it from `initial` on a new thread.
///
/// The returned stream yields the tokens as they are produced. The thread
/// is detached; it exits once the state machine finishes or the stream is
/// dropped. Use [`DriverConfig`](crate::DriverConfig) to name the thread,
/// set its stack size, or get a join handle.
///
/// # Panics
///
/// Panics if the OS cannot create a thread, like [`std::thread::spawn`].
pub fn lex<S>(name: impl Into<Arc<str>>, input: impl Into<Arc<str>>, initial: S) -> TokenStream
where
    S: State + Send + 'static,
{
    let (scanner, stream) = Scanner::new(name, input);
    thread::spawn(move || scanner.run(initial));
    stream
}
