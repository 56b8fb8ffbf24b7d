//! Errors reported by the lexing runtime.
//!
//! Malformed input is never an `Err`: state functions report it as a
//! [`Type::ERROR`](crate::Type::ERROR) token through
//! [`Scanner::errorf`](crate::Scanner::errorf). API misuse panics.
//! What remains are failures of the environment.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    /// The OS refused to start the driver thread.
    #[error("failed to spawn lexer thread for `{name}`")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
