//! `match` statements and their patterns.
//!
//! `match` and `case` are soft keywords: a line starting with `match` is a
//! match statement only if a subject, `':'` and a newline follow.

use shroud_ir::{
    Expr, ExprContext, ExprKind, MatchCase, Pattern, PatternKind, StmtKind, TokenKind,
};

use super::expr::tuple;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `None`, with the cursor restored, when the line is an ordinary
    /// statement such as `match = 1` or `match(x)`.
    pub(crate) fn try_parse_match(&mut self) -> Result<Option<StmtKind>, ParseError> {
        let checkpoint = self.cursor.position();
        self.advance();
        let subject = match self.parse_match_subject() {
            Ok(subject)
                if self.check(&TokenKind::Colon) && self.peek_kind(1) == &TokenKind::Newline =>
            {
                subject
            }
            _ => {
                self.cursor.set_position(checkpoint);
                return Ok(None);
            }
        };
        self.advance();
        self.advance();
        if !self.eat(&TokenKind::Indent) {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedIndentedBlock,
                self.current_span(),
            ));
        }
        let mut cases = vec![self.parse_case()?];
        while !self.eat(&TokenKind::Dedent) {
            if self.check(&TokenKind::Eof) {
                break;
            }
            cases.push(self.parse_case()?);
        }
        Ok(Some(StmtKind::Match { subject, cases }))
    }

    /// `star_named_expression (',' star_named_expression)* [',']`
    fn parse_match_subject(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_star_named_expression()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::Colon) {
                break;
            }
            elts.push(self.parse_star_named_expression()?);
        }
        Ok(tuple(elts))
    }

    /// `'case' patterns ['if' named_expression] block`
    fn parse_case(&mut self) -> Result<MatchCase, ParseError> {
        match self.current_kind() {
            TokenKind::Name(name) if name == "case" => {
                self.advance();
            }
            _ => return Err(self.unexpected("'case'")),
        }
        let pattern = self.parse_case_pattern()?;
        let guard = if self.eat(&TokenKind::If) {
            Some(self.parse_named_expression()?)
        } else {
            None
        };
        let body = self.parse_block()?;
        Ok(MatchCase {
            pattern,
            guard,
            body,
        })
    }

    /// A pattern, or an unbracketed sequence as in `case x, *rest:`.
    fn parse_case_pattern(&mut self) -> Result<Pattern, ParseError> {
        let first = self.parse_maybe_star_pattern()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let start = first.span;
        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            if matches!(self.current_kind(), TokenKind::Colon | TokenKind::If) {
                break;
            }
            items.push(self.parse_maybe_star_pattern()?);
        }
        Ok(Pattern::new(
            PatternKind::Sequence(items),
            start.merge(self.previous_span()),
        ))
    }

    /// `or_pattern ['as' NAME]`
    fn parse_pattern(&mut self) -> Result<Pattern, ParseError> {
        let pattern = self.parse_or_pattern()?;
        if !self.eat(&TokenKind::As) {
            return Ok(pattern);
        }
        let name = self.expect_capture_name()?;
        let span = pattern.span.merge(self.previous_span());
        Ok(Pattern::new(
            PatternKind::As {
                pattern: Some(Box::new(pattern)),
                name: Some(name),
            },
            span,
        ))
    }

    fn parse_or_pattern(&mut self) -> Result<Pattern, ParseError> {
        let first = self.parse_closed_pattern()?;
        if !self.check(&TokenKind::Pipe) {
            return Ok(first);
        }
        let start = first.span;
        let mut alternatives = vec![first];
        while self.eat(&TokenKind::Pipe) {
            alternatives.push(self.parse_closed_pattern()?);
        }
        Ok(Pattern::new(
            PatternKind::Or(alternatives),
            start.merge(self.previous_span()),
        ))
    }

    /// Sequence element: `'*' NAME | pattern`
    fn parse_maybe_star_pattern(&mut self) -> Result<Pattern, ParseError> {
        if !self.check(&TokenKind::Star) {
            return self.parse_pattern();
        }
        let start = self.advance();
        let (name, end) = self.expect_name()?;
        Ok(Pattern::new(
            PatternKind::Star((name != "_").then_some(name)),
            start.merge(end),
        ))
    }

    fn parse_closed_pattern(&mut self) -> Result<Pattern, ParseError> {
        shroud_stack::ensure_sufficient_stack(|| {
            let start = self.current_span();
            let kind = match self.current_kind() {
                TokenKind::Name(_)
                    if matches!(self.peek_kind(1), TokenKind::Dot | TokenKind::LParen) =>
                {
                    return self.parse_value_or_class_pattern();
                }
                TokenKind::Name(name) => {
                    self.advance();
                    PatternKind::As {
                        pattern: None,
                        name: (name != "_").then(|| name.clone()),
                    }
                }
                // Signed and complex literals: `-1`, `1+2j`.
                TokenKind::Minus
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Imaginary(_) => PatternKind::Value(self.parse_sum()?),
                TokenKind::Str(_) | TokenKind::Bytes(_) => PatternKind::Value(self.parse_strings()?),
                TokenKind::None | TokenKind::True | TokenKind::False => {
                    PatternKind::Value(self.parse_atom()?)
                }
                TokenKind::LParen => return self.parse_group_or_sequence_pattern(),
                TokenKind::LBracket => {
                    self.advance();
                    let items = self.parse_pattern_items(&TokenKind::RBracket)?;
                    self.expect(&TokenKind::RBracket, "']'")?;
                    PatternKind::Sequence(items)
                }
                TokenKind::LBrace => self.parse_mapping_pattern()?,
                _ => return Err(self.unexpected("pattern")),
            };
            Ok(Pattern::new(kind, start.merge(self.previous_span())))
        })
    }

    /// `a.b.c` value patterns and `Cls(p, attr=p)` class patterns.
    fn parse_value_or_class_pattern(&mut self) -> Result<Pattern, ParseError> {
        let start = self.current_span();
        let (id, span) = self.expect_name()?;
        let mut value = Expr::new(
            ExprKind::Name {
                id,
                ctx: ExprContext::Load,
            },
            span,
        );
        while self.eat(&TokenKind::Dot) {
            let (attr, attr_span) = self.expect_name()?;
            let span = value.span.merge(attr_span);
            value = Expr::new(
                ExprKind::Attribute {
                    value: Box::new(value),
                    attr,
                    ctx: ExprContext::Load,
                },
                span,
            );
        }
        if !self.eat(&TokenKind::LParen) {
            return Ok(Pattern::new(
                PatternKind::Value(value),
                start.merge(self.previous_span()),
            ));
        }

        let mut patterns = Vec::new();
        let mut kwd_attrs = Vec::new();
        let mut kwd_patterns = Vec::new();
        while !self.check(&TokenKind::RParen) {
            if let (TokenKind::Name(attr), TokenKind::Eq) = (self.current_kind(), self.peek_kind(1))
            {
                self.advance();
                self.advance();
                kwd_attrs.push(attr.clone());
                kwd_patterns.push(self.parse_pattern()?);
            } else if kwd_attrs.is_empty() {
                patterns.push(self.parse_pattern()?);
            } else {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidPattern("positional patterns follow keyword patterns"),
                    self.current_span(),
                ));
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(Pattern::new(
            PatternKind::Class {
                cls: value,
                patterns,
                kwd_attrs,
                kwd_patterns,
            },
            start.merge(self.previous_span()),
        ))
    }

    /// `(p)` is a group and yields `p` itself; `()`, `(p,)` and `(p, q)`
    /// are sequences.
    fn parse_group_or_sequence_pattern(&mut self) -> Result<Pattern, ParseError> {
        let start = self.advance();
        if self.eat(&TokenKind::RParen) {
            return Ok(Pattern::new(
                PatternKind::Sequence(Vec::new()),
                start.merge(self.previous_span()),
            ));
        }
        let first = self.parse_maybe_star_pattern()?;
        if !self.check(&TokenKind::Comma) && !matches!(first.kind, PatternKind::Star(_)) {
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::RParen) {
                break;
            }
            items.push(self.parse_maybe_star_pattern()?);
        }
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(Pattern::new(
            PatternKind::Sequence(items),
            start.merge(self.previous_span()),
        ))
    }

    fn parse_pattern_items(&mut self, close: &TokenKind) -> Result<Vec<Pattern>, ParseError> {
        let mut items = Vec::new();
        while !self.check(close) {
            items.push(self.parse_maybe_star_pattern()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// `{key: pattern, ..., **rest}`
    fn parse_mapping_pattern(&mut self) -> Result<PatternKind, ParseError> {
        self.advance();
        let mut keys = Vec::new();
        let mut patterns = Vec::new();
        let mut rest = None;
        while !self.check(&TokenKind::RBrace) {
            if rest.is_some() {
                return Err(self.unexpected("'}'"));
            }
            if self.eat(&TokenKind::DoubleStar) {
                rest = Some(self.expect_capture_name()?);
            } else {
                keys.push(self.parse_mapping_key()?);
                self.expect(&TokenKind::Colon, "':'")?;
                patterns.push(self.parse_pattern()?);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace, "'}'")?;
        Ok(PatternKind::Mapping {
            keys,
            patterns,
            rest,
        })
    }

    fn parse_mapping_key(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.current_kind(), TokenKind::Name(_)) && self.peek_kind(1) != &TokenKind::Dot
        {
            return Err(self.unexpected("literal or dotted name"));
        }
        let key = self.parse_closed_pattern()?;
        match key.kind {
            PatternKind::Value(expr) => Ok(expr),
            _ => Err(ParseError::new(
                ParseErrorKind::InvalidPattern("mapping keys must be literals or dotted names"),
                key.span,
            )),
        }
    }

    fn expect_capture_name(&mut self) -> Result<String, ParseError> {
        if matches!(self.current_kind(), TokenKind::Name(name) if name == "_") {
            return Err(ParseError::new(
                ParseErrorKind::InvalidPattern("cannot use '_' as a target"),
                self.current_span(),
            ));
        }
        Ok(self.expect_name()?.0)
    }
}
