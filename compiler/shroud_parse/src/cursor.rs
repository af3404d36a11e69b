//! Token cursor for navigating the token stream.

use shroud_ir::{Span, Token, TokenKind, TokenList};

/// Cursor over a token list.
///
/// Invariant: the list ends in `Eof` and the position never moves past it.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        debug_assert!(
            matches!(tokens.as_slice().last(), Some(t) if t.kind == TokenKind::Eof),
            "token list must end in Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos < self.tokens.len(), "cursor position out of bounds");
        self.pos = pos;
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        let tokens = self.tokens.as_slice();
        &tokens[self.pos.min(tokens.len() - 1)]
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token.
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Kind of the token `n` positions ahead; `Eof` past the end.
    pub fn peek_kind(&self, n: usize) -> &'a TokenKind {
        let tokens = self.tokens.as_slice();
        &tokens[(self.pos + n).min(tokens.len() - 1)].kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Advance to the next token and return the consumed one.
    ///
    /// Stays on `Eof` once reached.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_stops_at_eof() {
        let tokens = shroud_lexer::lex("x").unwrap_or_default();
        let mut cursor = Cursor::new(&tokens);
        assert!(matches!(cursor.advance().kind, TokenKind::Name(_)));
        assert_eq!(cursor.advance().kind, TokenKind::Newline);
        assert!(cursor.is_at_end());
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek_kind(5), &TokenKind::Eof);
    }
}
