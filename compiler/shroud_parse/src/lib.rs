//! Recursive descent parser for Python source.
//!
//! # Module Structure
//!
//! - `cursor`: token navigation
//! - `error`: `ParseError` and its kinds
//! - `grammar/stmt`: simple statements and assignment forms
//! - `grammar/compound`: blocks, control flow, definitions, decorators
//! - `grammar/params`: parameter lists for `def` and `lambda`
//! - `grammar/expr`: the precedence chain, atoms, trailers, f-strings
//! - `target`: assignment/deletion target validation

mod cursor;
mod error;
mod grammar;
mod target;

use shroud_ir::{Module, Span, TokenKind, TokenList};

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

/// Parse a source file into a module.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Module, ParseError> {
    let tokens = shroud_lexer::lex(source)?;
    let module = Parser::new(&tokens).parse_module()?;
    tracing::debug!(statements = module.body.len(), "parsed");
    Ok(module)
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse statements until end of input.
    pub fn parse_module(&mut self) -> Result<Module, ParseError> {
        let mut body = Vec::new();
        loop {
            match self.current_kind() {
                TokenKind::Eof => break,
                TokenKind::Newline => {
                    self.advance();
                }
                TokenKind::Indent => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedIndent,
                        self.current_span(),
                    ));
                }
                _ => self.parse_statement(&mut body)?,
            }
        }
        Ok(Module { body })
    }

    // Cursor delegation

    #[inline]
    pub(crate) fn current_kind(&self) -> &'a TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    pub(crate) fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    pub(crate) fn peek_kind(&self, n: usize) -> &'a TokenKind {
        self.cursor.peek_kind(n)
    }

    #[inline]
    pub(crate) fn advance(&mut self) -> Span {
        self.cursor.advance().span
    }

    /// Whether the current token is `kind`. Only meaningful for tokens
    /// without payload.
    #[inline]
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or fail with "expected `expected`".
    pub(crate) fn expect(
        &mut self,
        kind: &TokenKind,
        expected: &'static str,
    ) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub(crate) fn expect_name(&mut self) -> Result<(String, Span), ParseError> {
        match self.current_kind() {
            TokenKind::Name(name) => {
                let span = self.advance();
                Ok((name.clone(), span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    #[cold]
    pub(crate) fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::unexpected(expected, self.current_kind(), self.current_span())
    }
}

#[cfg(test)]
mod tests;
