//! Line structure: logical newlines and indentation tokens.
//!
//! Raw tokens arrive with physical newlines. This pass drops newlines inside
//! brackets and on blank or comment-only lines, and emits `Indent`/`Dedent`
//! when the leading whitespace of a logical line changes.

use shroud_ir::{Span, Token, TokenKind, TokenList};

use crate::lex_error::{LexError, LexErrorKind};

pub(crate) struct Layout<'src> {
    source: &'src str,
    base: u32,
    tokens: TokenList,
    indents: Vec<u32>,
    depth: u32,
    at_line_start: bool,
    line_has_content: bool,
}

impl<'src> Layout<'src> {
    /// `depth` > 0 lexes as if inside brackets: no layout tokens at all.
    pub(crate) fn new(source: &'src str, base: u32, depth: u32) -> Self {
        Layout {
            source,
            base,
            tokens: TokenList::new(),
            indents: vec![0],
            depth,
            at_line_start: true,
            line_has_content: false,
        }
    }

    /// Physical newline at `span`.
    pub(crate) fn newline(&mut self, span: Span) {
        if self.depth > 0 || !self.line_has_content {
            return;
        }
        self.tokens.push(Token::new(TokenKind::Newline, span));
        self.at_line_start = true;
        self.line_has_content = false;
    }

    pub(crate) fn token(&mut self, kind: TokenKind, span: Span) -> Result<(), LexError> {
        if self.at_line_start && self.depth == 0 {
            self.indent_to(self.indent_width(span.start - self.base), span)?;
        }
        self.at_line_start = false;
        self.line_has_content = true;

        match kind {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => self.depth += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                self.depth = self.depth.saturating_sub(1);
            }
            _ => {}
        }
        self.tokens.push(Token::new(kind, span));
        Ok(())
    }

    fn indent_to(&mut self, width: u32, span: Span) -> Result<(), LexError> {
        let current = self.indents.last().copied().unwrap_or(0);
        if width > current {
            self.indents.push(width);
            self.tokens.push(Token::new(TokenKind::Indent, Span::point(span.start)));
            return Ok(());
        }
        while self.indents.last().is_some_and(|&top| top > width) {
            self.indents.pop();
            self.tokens.push(Token::new(TokenKind::Dedent, Span::point(span.start)));
        }
        if self.indents.last().copied().unwrap_or(0) != width {
            return Err(LexError::new(LexErrorKind::InconsistentDedent, span));
        }
        Ok(())
    }

    /// Column width of the whitespace before local offset `at` on its line.
    ///
    /// Tabs advance to the next multiple of 8; form feeds reset the count.
    fn indent_width(&self, at: u32) -> u32 {
        let at = (at as usize).min(self.source.len());
        let line_start = self.source[..at].rfind('\n').map_or(0, |i| i + 1);
        let mut width = 0;
        for c in self.source[line_start..at].chars() {
            match c {
                '\t' => width = (width / 8 + 1) * 8,
                '\x0C' => width = 0,
                _ => width += 1,
            }
        }
        width
    }

    pub(crate) fn finish(mut self) -> TokenList {
        let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX) + self.base;
        if self.line_has_content && self.depth == 0 {
            self.tokens.push(Token::new(TokenKind::Newline, Span::point(end)));
        }
        if self.depth == 0 {
            while self.indents.len() > 1 {
                self.indents.pop();
                self.tokens.push(Token::new(TokenKind::Dedent, Span::point(end)));
            }
        }
        self.tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
        self.tokens
    }
}
