//! Lexer error types.

use shroud_ir::Span;
use thiserror::Error;

/// A lexer error: what went wrong and where.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[cold]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid string prefix `{0}`")]
    InvalidStringPrefix(String),
    #[error("source file exceeds 4 GiB")]
    SourceTooLarge,
    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),
    #[error("named unicode escapes (`\\N{{...}}`) are not supported")]
    NamedUnicodeEscape,
    #[error("bytes literal may only contain ASCII characters")]
    NonAsciiBytes,
    #[error("invalid numeric literal")]
    InvalidNumber,
    #[error("invalid character `{0}` in source")]
    InvalidCharacter(char),
    #[error("unindent does not match any outer indentation level")]
    InconsistentDedent,
    #[error("f-string: single `}}` is not allowed")]
    SingleCloseBrace,
    #[error("f-string: expecting `}}`")]
    UnterminatedSlot,
    #[error("f-string: empty expression not allowed")]
    EmptySlot,
    #[error("f-string: invalid conversion character `{0}`; expected 's', 'r', or 'a'")]
    InvalidConversion(char),
}
