//! Atoms: names, literals, parenthesized forms, displays and
//! comprehensions.

use shroud_ir::{Comprehension, Constant, Expr, ExprContext, ExprKind, TokenKind};

use super::tuple;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();
        let constant = |c: Constant| Expr::new(ExprKind::Constant(c), span);
        match self.current_kind() {
            TokenKind::Name(id) => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Name {
                        id: id.clone(),
                        ctx: ExprContext::Load,
                    },
                    span,
                ))
            }
            TokenKind::True => {
                self.advance();
                Ok(constant(Constant::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(constant(Constant::Bool(false)))
            }
            TokenKind::None => {
                self.advance();
                Ok(constant(Constant::None))
            }
            TokenKind::Ellipsis => {
                self.advance();
                Ok(constant(Constant::Ellipsis))
            }
            TokenKind::Int(value) => {
                self.advance();
                Ok(constant(Constant::Int(value.clone())))
            }
            TokenKind::Float(value) => {
                self.advance();
                Ok(constant(Constant::Float(*value)))
            }
            TokenKind::Imaginary(value) => {
                self.advance();
                Ok(constant(Constant::Imaginary(*value)))
            }
            TokenKind::Str(_) | TokenKind::Bytes(_) | TokenKind::FString(_) => self.parse_strings(),
            TokenKind::LParen => self.parse_parenthesized(),
            TokenKind::LBracket => self.parse_list_display(),
            TokenKind::LBrace => self.parse_brace_display(),
            TokenKind::Yield => Err(ParseError::new(ParseErrorKind::Misplaced("yield"), span)),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// `()`, `(yield)`, `(expr)`, `(a, b)`, `(x for x in y)`.
    fn parse_parenthesized(&mut self) -> Result<Expr, ParseError> {
        let start = self.advance();
        if self.check(&TokenKind::RParen) {
            let end = self.advance();
            return Ok(Expr::new(
                ExprKind::Tuple {
                    elts: Vec::new(),
                    ctx: ExprContext::Load,
                },
                start.merge(end),
            ));
        }
        if self.check(&TokenKind::Yield) {
            let value = self.parse_yield_expression()?;
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(value);
        }

        let first = self.parse_star_named_expression()?;
        if self.is_comprehension_start() {
            let generators = self.parse_comprehension_clauses()?;
            let end = self.expect(&TokenKind::RParen, "')'")?;
            return Ok(Expr::new(
                ExprKind::GeneratorExp {
                    elt: Box::new(first),
                    generators,
                },
                start.merge(end),
            ));
        }
        if !self.check(&TokenKind::Comma) {
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(first);
        }

        let mut elts = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::RParen) {
                break;
            }
            elts.push(self.parse_star_named_expression()?);
        }
        let end = self.expect(&TokenKind::RParen, "')'")?;
        let mut expr = tuple(elts);
        expr.span = start.merge(end);
        Ok(expr)
    }

    /// `[...]`: list display or list comprehension.
    fn parse_list_display(&mut self) -> Result<Expr, ParseError> {
        let start = self.advance();
        let mut elts = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            let first = self.parse_star_named_expression()?;
            if self.is_comprehension_start() {
                let generators = self.parse_comprehension_clauses()?;
                let end = self.expect(&TokenKind::RBracket, "']'")?;
                return Ok(Expr::new(
                    ExprKind::ListComp {
                        elt: Box::new(first),
                        generators,
                    },
                    start.merge(end),
                ));
            }
            elts.push(first);
            while self.eat(&TokenKind::Comma) {
                if self.check(&TokenKind::RBracket) {
                    break;
                }
                elts.push(self.parse_star_named_expression()?);
            }
        }
        let end = self.expect(&TokenKind::RBracket, "']'")?;
        Ok(Expr::new(
            ExprKind::List {
                elts,
                ctx: ExprContext::Load,
            },
            start.merge(end),
        ))
    }

    /// `{...}`: dict or set display, or their comprehensions.
    fn parse_brace_display(&mut self) -> Result<Expr, ParseError> {
        let start = self.advance();
        if self.check(&TokenKind::RBrace) {
            let end = self.advance();
            return Ok(Expr::new(
                ExprKind::Dict {
                    keys: Vec::new(),
                    values: Vec::new(),
                },
                start.merge(end),
            ));
        }

        let first_key = if self.eat(&TokenKind::DoubleStar) {
            None
        } else {
            let key = self.parse_star_named_expression()?;
            if !self.check(&TokenKind::Colon) {
                return self.parse_set_rest(start, key);
            }
            Some(key)
        };

        let first_value = if first_key.is_some() {
            self.expect(&TokenKind::Colon, "':'")?;
            self.parse_expression()?
        } else {
            self.parse_bitor()?
        };

        let first_key = match first_key {
            Some(key) if self.is_comprehension_start() => {
                let generators = self.parse_comprehension_clauses()?;
                let end = self.expect(&TokenKind::RBrace, "'}'")?;
                return Ok(Expr::new(
                    ExprKind::DictComp {
                        key: Box::new(key),
                        value: Box::new(first_value),
                        generators,
                    },
                    start.merge(end),
                ));
            }
            other => other,
        };

        let mut keys = vec![first_key];
        let mut values = vec![first_value];
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::RBrace) {
                break;
            }
            if self.eat(&TokenKind::DoubleStar) {
                keys.push(None);
                values.push(self.parse_bitor()?);
            } else {
                keys.push(Some(self.parse_expression()?));
                self.expect(&TokenKind::Colon, "':'")?;
                values.push(self.parse_expression()?);
            }
        }
        let end = self.expect(&TokenKind::RBrace, "'}'")?;
        Ok(Expr::new(ExprKind::Dict { keys, values }, start.merge(end)))
    }

    fn parse_set_rest(
        &mut self,
        start: shroud_ir::Span,
        first: Expr,
    ) -> Result<Expr, ParseError> {
        if self.is_comprehension_start() {
            let generators = self.parse_comprehension_clauses()?;
            let end = self.expect(&TokenKind::RBrace, "'}'")?;
            return Ok(Expr::new(
                ExprKind::SetComp {
                    elt: Box::new(first),
                    generators,
                },
                start.merge(end),
            ));
        }
        let mut elts = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::RBrace) {
                break;
            }
            elts.push(self.parse_star_named_expression()?);
        }
        let end = self.expect(&TokenKind::RBrace, "'}'")?;
        Ok(Expr::new(ExprKind::Set(elts), start.merge(end)))
    }

    fn is_comprehension_start(&self) -> bool {
        match self.current_kind() {
            TokenKind::For => true,
            TokenKind::Async => self.peek_kind(1) == &TokenKind::For,
            _ => false,
        }
    }

    /// `('async'? 'for' targets 'in' disjunction ('if' disjunction)*)+`
    pub(crate) fn parse_comprehension_clauses(&mut self) -> Result<Vec<Comprehension>, ParseError> {
        let mut generators = Vec::new();
        while self.is_comprehension_start() {
            let is_async = self.eat(&TokenKind::Async);
            self.expect(&TokenKind::For, "'for'")?;
            let target = self.parse_target_list()?;
            self.expect(&TokenKind::In, "'in'")?;
            let iter = self.parse_disjunction()?;
            let mut ifs = Vec::new();
            while self.eat(&TokenKind::If) {
                ifs.push(self.parse_disjunction()?);
            }
            generators.push(Comprehension {
                target,
                iter,
                ifs,
                is_async,
            });
        }
        Ok(generators)
    }
}
