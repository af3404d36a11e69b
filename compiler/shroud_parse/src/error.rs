//! Parse error types.

use shroud_ir::{Span, TokenKind};
use shroud_lexer::{LexError, LexErrorKind};
use thiserror::Error;

/// A syntax error with its location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Lex(#[from] LexErrorKind),
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
    },
    #[error("cannot {action} {target}")]
    InvalidTarget {
        action: &'static str,
        target: &'static str,
    },
    #[error("unexpected indent")]
    UnexpectedIndent,
    #[error("expected an indented block")]
    ExpectedIndentedBlock,
    #[error("cannot mix bytes and nonbytes literals")]
    MixedBytesAndStr,
    #[error("parameter without a default follows parameter with a default")]
    NonDefaultAfterDefault,
    #[error("invalid parameter list: {0}")]
    InvalidParameters(&'static str),
    #[error("positional argument follows keyword argument")]
    PositionalAfterKeyword,
    #[error("'{0}' outside of a valid context")]
    Misplaced(&'static str),
    #[error("invalid pattern: {0}")]
    InvalidPattern(&'static str),
    #[error("cannot have both 'except' and 'except*' on the same 'try'")]
    MixedExceptStar,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    #[cold]
    pub fn unexpected(expected: &'static str, found: &TokenKind, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected,
                found: found.display_name(),
            },
            span,
        )
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ParseErrorKind::Lex(err.kind), err.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = ParseError::unexpected("':'", &TokenKind::Newline, Span::new(4, 5));
        assert_eq!(err.to_string(), "expected ':', found newline");
        let lex: ParseError =
            LexError::new(LexErrorKind::UnterminatedString, Span::new(0, 1)).into();
        assert_eq!(lex.to_string(), "unterminated string literal");
        assert_eq!(lex.span, Span::new(0, 1));
    }
}
