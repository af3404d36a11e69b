//! F-string body scanning.
//!
//! Splits an f-string body into literal text and replacement fields. Field
//! expressions are kept as source text with their absolute offset; the
//! parser lexes and parses them on its own.

use shroud_ir::{Conversion, FStringSegment, FStringSlot, Span};

use crate::cook_escape::{cook_escapes, EscapeMode};
use crate::lex_error::{LexError, LexErrorKind};

/// Scan an f-string body that starts at absolute offset `offset`.
pub(crate) fn scan_fstring(
    body: &str,
    offset: u32,
    raw: bool,
) -> Result<Vec<FStringSegment>, LexError> {
    let mut scanner = FStringScanner {
        body,
        offset,
        raw,
        pos: 0,
    };
    scanner.segments(false)
}

struct FStringScanner<'a> {
    body: &'a str,
    offset: u32,
    raw: bool,
    pos: usize,
}

impl FStringScanner<'_> {
    fn peek(&self) -> Option<char> {
        self.body[self.pos..].chars().next()
    }

    fn peek_at(&self, skip: usize) -> Option<char> {
        self.body[self.pos..].chars().nth(skip)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "source offsets bounded by u32 - entire source file < u32::MAX bytes"
    )]
    fn abs(&self, pos: usize) -> u32 {
        self.offset + pos as u32
    }

    fn error(&self, kind: LexErrorKind, start: usize) -> LexError {
        LexError::new(kind, Span::new(self.abs(start), self.abs(self.pos.max(start + 1))))
    }

    /// Cook `body[start..end]` and append it to `literal`.
    fn flush(&self, literal: &mut String, start: usize, end: usize) -> Result<(), LexError> {
        if start == end {
            return Ok(());
        }
        let text = &self.body[start..end];
        if self.raw {
            literal.push_str(text);
        } else {
            literal.push_str(&cook_escapes(text, self.abs(start), EscapeMode::Text)?);
        }
        Ok(())
    }

    /// Literal runs and slots up to end of input, or up to the `}` closing a
    /// format spec when `in_spec` is set (left unconsumed).
    fn segments(&mut self, in_spec: bool) -> Result<Vec<FStringSegment>, LexError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut run_start = self.pos;

        loop {
            match self.peek() {
                None => {
                    if in_spec {
                        return Err(self.error(LexErrorKind::UnterminatedSlot, run_start));
                    }
                    break;
                }
                Some('{') => {
                    self.flush(&mut literal, run_start, self.pos)?;
                    if !in_spec && self.peek_at(1) == Some('{') {
                        self.pos += 2;
                        literal.push('{');
                    } else {
                        if !literal.is_empty() {
                            segments.push(FStringSegment::Literal(std::mem::take(&mut literal)));
                        }
                        self.bump();
                        segments.push(FStringSegment::Slot(self.slot()?));
                    }
                    run_start = self.pos;
                }
                Some('}') => {
                    if in_spec {
                        break;
                    }
                    self.flush(&mut literal, run_start, self.pos)?;
                    if self.peek_at(1) != Some('}') {
                        let start = self.pos;
                        self.bump();
                        return Err(self.error(LexErrorKind::SingleCloseBrace, start));
                    }
                    self.pos += 2;
                    literal.push('}');
                    run_start = self.pos;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        self.flush(&mut literal, run_start, self.pos)?;
        if !literal.is_empty() {
            segments.push(FStringSegment::Literal(literal));
        }
        Ok(segments)
    }

    /// Replacement field after its opening `{`, through the closing `}`.
    fn slot(&mut self) -> Result<FStringSlot, LexError> {
        let start = self.pos;
        let mut depth = 0u32;
        let mut debug_end = None;

        let expr_end = loop {
            let Some(c) = self.peek() else {
                return Err(self.error(LexErrorKind::UnterminatedSlot, start));
            };
            match c {
                '\'' | '"' => self.skip_nested_string(c, start)?,
                '(' | '[' | '{' => {
                    depth += 1;
                    self.bump();
                }
                ')' | ']' => {
                    depth = depth.saturating_sub(1);
                    self.bump();
                }
                '}' if depth > 0 => {
                    depth -= 1;
                    self.bump();
                }
                '}' | ':' if depth == 0 => break self.pos,
                '!' if depth == 0 && self.peek_at(1) != Some('=') => break self.pos,
                '=' if depth == 0 && self.is_debug_equals() => {
                    let end = self.pos;
                    self.bump();
                    while self.peek().is_some_and(char::is_whitespace) {
                        self.bump();
                    }
                    debug_end = Some(self.pos);
                    break end;
                }
                '=' | '!' | '<' | '>' => {
                    // Consume two-character operators whole so `==` is not
                    // taken for a self-documenting `=`.
                    self.bump();
                    if self.peek() == Some('=') {
                        self.bump();
                    }
                }
                _ => {
                    self.bump();
                }
            }
        };

        let source = &self.body[start..expr_end];
        if source.trim().is_empty() {
            return Err(self.error(LexErrorKind::EmptySlot, start));
        }
        let debug_text = debug_end.map(|end| self.body[start..end].to_string());

        let conversion = if self.peek() == Some('!') {
            self.bump();
            let at = self.pos;
            let conversion = match self.bump() {
                Some('s') => Conversion::Str,
                Some('r') => Conversion::Repr,
                Some('a') => Conversion::Ascii,
                Some(other) => return Err(self.error(LexErrorKind::InvalidConversion(other), at)),
                None => return Err(self.error(LexErrorKind::UnterminatedSlot, start)),
            };
            Some(conversion)
        } else {
            None
        };

        let format_spec = if self.peek() == Some(':') {
            self.bump();
            self.segments(true)?
        } else {
            Vec::new()
        };

        if self.bump() != Some('}') {
            return Err(self.error(LexErrorKind::UnterminatedSlot, start));
        }

        Ok(FStringSlot {
            source: source.to_string(),
            offset: self.abs(start),
            debug_text,
            conversion,
            format_spec,
        })
    }

    /// `=` at depth 0 that ends the expression: followed (after whitespace)
    /// by `}`, `!` or `:`.
    fn is_debug_equals(&self) -> bool {
        if self.peek_at(1) == Some('=') {
            return false;
        }
        let rest = self.body[self.pos + 1..].trim_start();
        rest.starts_with('}') || rest.starts_with('!') || rest.starts_with(':')
    }

    fn skip_nested_string(&mut self, quote: char, slot_start: usize) -> Result<(), LexError> {
        self.bump();
        loop {
            match self.bump() {
                None => return Err(self.error(LexErrorKind::UnterminatedSlot, slot_start)),
                Some('\\') => {
                    self.bump();
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }
}
