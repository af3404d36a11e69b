//! Obfuscation failures.

use shroud_parse::ParseError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ObfuscateError {
    /// The input is not valid source; nothing is produced.
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    /// Integer encoding recursed deeper than the literal's bit length allows.
    #[error("encoding {value} exceeded the recursion bound of {depth}")]
    EncodingRecursionExhausted { value: String, depth: usize },

    /// A header alias is not defined exactly once in the printed output.
    #[error("header alias `{alias}` is defined {found} times in the output, expected once")]
    PostProcessMismatch { alias: String, found: usize },
}

impl ObfuscateError {
    /// The parse error, if this is one.
    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            ObfuscateError::Parse(err) => Some(err),
            _ => None,
        }
    }
}
