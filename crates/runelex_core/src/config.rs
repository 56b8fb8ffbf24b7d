//! Driver thread configuration.

use std::thread::{self, JoinHandle};

use crate::error::LexError;
use crate::scanner::{Scanner, State};

/// How to launch a [`Scanner`] on its own thread.
///
/// ```text
/// let (scanner, stream) = Scanner::new("input.ini", text);
/// let handle = DriverConfig::new()
///     .stack_size(256 * 1024)
///     .spawn(scanner, StateFn(lex_line))?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct DriverConfig {
    thread_name: Option<String>,
    stack_size: Option<usize>,
}

impl DriverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thread name. Defaults to `lex:<input name>`.
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = Some(name.into());
        self
    }

    /// Stack size in bytes. Defaults to the platform default for spawned
    /// threads. Deeply recursive state functions may need more.
    #[must_use]
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Start `scanner.run(initial)` on a new thread.
    ///
    /// The handle joins once the state machine finishes and the last token
    /// has been taken (or the stream was drained or dropped).
    pub fn spawn<S>(&self, scanner: Scanner, initial: S) -> Result<JoinHandle<()>, LexError>
    where
        S: State + Send + 'static,
    {
        let name = self
            .thread_name
            .clone()
            .unwrap_or_else(|| format!("lex:{}", scanner.name()));
        let mut builder = thread::Builder::new().name(name.clone());
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }
        builder
            .spawn(move || scanner.run(initial))
            .map_err(|source| LexError::Spawn { name, source })
    }
}
