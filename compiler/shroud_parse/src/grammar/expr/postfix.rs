//! Trailers: attribute access, calls and subscripts.

use shroud_ir::{Expr, ExprContext, ExprKind, Keyword, TokenKind};

use super::tuple;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `atom trailer*`
    pub(crate) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_atom()?;
        loop {
            match self.current_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let (attr, attr_span) = self.expect_name()?;
                    let span = expr.span.merge(attr_span);
                    expr = Expr::new(
                        ExprKind::Attribute {
                            value: Box::new(expr),
                            attr,
                            ctx: ExprContext::Load,
                        },
                        span,
                    );
                }
                TokenKind::LParen => {
                    self.advance();
                    let (args, keywords) = self.parse_call_arguments()?;
                    let end = self.expect(&TokenKind::RParen, "')'")?;
                    let span = expr.span.merge(end);
                    expr = Expr::new(
                        ExprKind::Call {
                            func: Box::new(expr),
                            args,
                            keywords,
                        },
                        span,
                    );
                }
                TokenKind::LBracket => {
                    self.advance();
                    let slice = self.parse_slices()?;
                    let end = self.expect(&TokenKind::RBracket, "']'")?;
                    let span = expr.span.merge(end);
                    expr = Expr::new(
                        ExprKind::Subscript {
                            value: Box::new(expr),
                            slice: Box::new(slice),
                            ctx: ExprContext::Load,
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Arguments between the parentheses of a call or class header; stops
    /// before `)`.
    pub(crate) fn parse_call_arguments(&mut self) -> Result<(Vec<Expr>, Vec<Keyword>), ParseError> {
        let mut args = Vec::new();
        let mut keywords: Vec<Keyword> = Vec::new();

        while !self.check(&TokenKind::RParen) {
            let start = self.current_span();
            match self.current_kind() {
                TokenKind::Star => {
                    args.push(self.parse_star_named_expression()?);
                }
                TokenKind::DoubleStar => {
                    self.advance();
                    let value = self.parse_expression()?;
                    keywords.push(Keyword {
                        arg: None,
                        span: start.merge(value.span),
                        value,
                    });
                }
                TokenKind::Name(name) if self.peek_kind(1) == &TokenKind::Eq => {
                    self.advance();
                    self.advance();
                    let value = self.parse_expression()?;
                    keywords.push(Keyword {
                        arg: Some(name.clone()),
                        span: start.merge(value.span),
                        value,
                    });
                }
                _ => {
                    let value = self.parse_named_expression()?;
                    if matches!(self.current_kind(), TokenKind::For | TokenKind::Async) {
                        let generators = self.parse_comprehension_clauses()?;
                        let span = value.span.merge(self.previous_span());
                        args.push(Expr::new(
                            ExprKind::GeneratorExp {
                                elt: Box::new(value),
                                generators,
                            },
                            span,
                        ));
                    } else {
                        if !keywords.is_empty() {
                            return Err(ParseError::new(
                                ParseErrorKind::PositionalAfterKeyword,
                                value.span,
                            ));
                        }
                        args.push(value);
                    }
                }
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok((args, keywords))
    }

    /// Contents of `[...]` after a primary: one slice, or a tuple of them.
    fn parse_slices(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_slice()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::RBracket) {
                break;
            }
            elts.push(self.parse_slice()?);
        }
        Ok(tuple(elts))
    }

    /// `[lower] ':' [upper] [':' [step]]`, or a plain index.
    fn parse_slice(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span();
        let lower = if self.check(&TokenKind::Colon) {
            None
        } else {
            let index = self.parse_star_named_expression()?;
            if !self.check(&TokenKind::Colon) {
                return Ok(index);
            }
            Some(Box::new(index))
        };
        self.expect(&TokenKind::Colon, "':'")?;
        let ends_bound =
            |kind: &TokenKind| matches!(kind, TokenKind::Colon | TokenKind::Comma | TokenKind::RBracket);
        let upper = if ends_bound(self.current_kind()) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        let step = if self.eat(&TokenKind::Colon) {
            if ends_bound(self.current_kind()) {
                None
            } else {
                Some(Box::new(self.parse_expression()?))
            }
        } else {
            None
        };
        Ok(Expr::new(
            ExprKind::Slice { lower, upper, step },
            start.merge(self.previous_span()),
        ))
    }
}
