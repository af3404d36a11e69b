//! Expression parsing.
//!
//! # Module Structure
//!
//! - `mod.rs`: entry points and the binary operator precedence chain
//! - `operators.rs`: operator matching helpers
//! - `primary.rs`: atoms, displays, comprehensions
//! - `postfix.rs`: attribute, call and subscript trailers
//! - `strings.rs`: implicit concatenation and f-string fields

mod operators;
mod postfix;
mod primary;
mod strings;

use shroud_ir::{BoolOp, Expr, ExprContext, ExprKind, Span, TokenKind, UnaryOp};

use crate::target::set_context;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `star_expressions`: one expression, or an unparenthesized tuple.
    pub(crate) fn parse_star_expressions(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_star_expression()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat(&TokenKind::Comma) {
            if !self.can_start_expression() {
                break;
            }
            elts.push(self.parse_star_expression()?);
        }
        Ok(tuple(elts))
    }

    /// `'*' bitwise_or | expression`
    fn parse_star_expression(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Star) {
            self.parse_starred()
        } else {
            self.parse_expression()
        }
    }

    /// `'*' bitwise_or | named_expression`, the element form of displays.
    pub(crate) fn parse_star_named_expression(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Star) {
            self.parse_starred()
        } else {
            self.parse_named_expression()
        }
    }

    fn parse_starred(&mut self) -> Result<Expr, ParseError> {
        let start = self.advance();
        let value = self.parse_bitor()?;
        let span = start.merge(value.span);
        Ok(Expr::new(
            ExprKind::Starred {
                value: Box::new(value),
                ctx: ExprContext::Load,
            },
            span,
        ))
    }

    /// `NAME ':=' expression | expression`
    pub(crate) fn parse_named_expression(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.current_kind(), TokenKind::Name(_))
            && self.peek_kind(1) == &TokenKind::ColonEq
        {
            let (id, start) = self.expect_name()?;
            self.advance();
            let value = self.parse_expression()?;
            let span = start.merge(value.span);
            let target = Expr::new(
                ExprKind::Name {
                    id,
                    ctx: ExprContext::Store,
                },
                start,
            );
            return Ok(Expr::new(
                ExprKind::NamedExpr {
                    target: Box::new(target),
                    value: Box::new(value),
                },
                span,
            ));
        }
        self.parse_expression()
    }

    /// Parse an expression.
    ///
    /// Uses `ensure_sufficient_stack` to prevent stack overflow on deeply
    /// nested expressions.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        shroud_stack::ensure_sufficient_stack(|| self.parse_expression_inner())
    }

    /// `lambda | disjunction ['if' disjunction 'else' expression]`
    fn parse_expression_inner(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Lambda) {
            return self.parse_lambda();
        }
        let body = self.parse_disjunction()?;
        if !self.eat(&TokenKind::If) {
            return Ok(body);
        }
        let test = self.parse_disjunction()?;
        self.expect(&TokenKind::Else, "'else'")?;
        let orelse = self.parse_expression()?;
        let span = body.span.merge(orelse.span);
        Ok(Expr::new(
            ExprKind::IfExp {
                test: Box::new(test),
                body: Box::new(body),
                orelse: Box::new(orelse),
            },
            span,
        ))
    }

    fn parse_lambda(&mut self) -> Result<Expr, ParseError> {
        let start = self.advance();
        let args = self.parse_parameters(&TokenKind::Colon, false)?;
        self.expect(&TokenKind::Colon, "':'")?;
        let body = self.parse_expression()?;
        let span = start.merge(body.span);
        Ok(Expr::new(
            ExprKind::Lambda {
                args: Box::new(args),
                body: Box::new(body),
            },
            span,
        ))
    }

    /// `'yield' 'from' expression | 'yield' [star_expressions]`
    pub(crate) fn parse_yield_expression(&mut self) -> Result<Expr, ParseError> {
        let start = self.advance();
        if self.eat(&TokenKind::From) {
            let value = self.parse_expression()?;
            let span = start.merge(value.span);
            return Ok(Expr::new(ExprKind::YieldFrom(Box::new(value)), span));
        }
        let value = if self.can_start_expression() {
            Some(Box::new(self.parse_star_expressions()?))
        } else {
            None
        };
        let span = start.merge(self.previous_span());
        Ok(Expr::new(ExprKind::Yield(value), span))
    }

    /// Disjunction: `a or b or c`.
    pub(crate) fn parse_disjunction(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_conjunction()?;
        if !self.check(&TokenKind::Or) {
            return Ok(first);
        }
        let mut values = vec![first];
        while self.eat(&TokenKind::Or) {
            values.push(self.parse_conjunction()?);
        }
        Ok(bool_op(BoolOp::Or, values))
    }

    /// Conjunction: `a and b and c`.
    fn parse_conjunction(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_inversion()?;
        if !self.check(&TokenKind::And) {
            return Ok(first);
        }
        let mut values = vec![first];
        while self.eat(&TokenKind::And) {
            values.push(self.parse_inversion()?);
        }
        Ok(bool_op(BoolOp::And, values))
    }

    /// `'not' inversion | comparison`
    fn parse_inversion(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Not) {
            let start = self.advance();
            let operand = shroud_stack::ensure_sufficient_stack(|| self.parse_inversion())?;
            return Ok(unary(UnaryOp::Not, operand, start));
        }
        self.parse_comparison()
    }

    /// Comparison chain: `a < b <= c`, `x not in y`, `p is not q`.
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_bitor()?;
        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        while let Some(op) = self.match_comparison_op() {
            comparators.push(self.parse_bitor()?);
            ops.push(op);
        }
        if ops.is_empty() {
            return Ok(left);
        }
        let span = left.span.merge(self.previous_span());
        Ok(Expr::new(
            ExprKind::Compare {
                left: Box::new(left),
                ops,
                comparators,
            },
            span,
        ))
    }

    /// `|`
    pub(crate) fn parse_bitor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_bitxor()?;
        while self.eat(&TokenKind::Pipe) {
            let right = self.parse_bitxor()?;
            left = binary(left, shroud_ir::BinaryOp::BitOr, right);
        }
        Ok(left)
    }

    /// `^`
    fn parse_bitxor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_bitand()?;
        while self.eat(&TokenKind::Caret) {
            let right = self.parse_bitand()?;
            left = binary(left, shroud_ir::BinaryOp::BitXor, right);
        }
        Ok(left)
    }

    /// `&`
    fn parse_bitand(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_shift()?;
        while self.eat(&TokenKind::Amp) {
            let right = self.parse_shift()?;
            left = binary(left, shroud_ir::BinaryOp::BitAnd, right);
        }
        Ok(left)
    }

    /// `<<` `>>`
    fn parse_shift(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_sum()?;
        while let Some(op) = self.match_shift_op() {
            self.advance();
            let right = self.parse_sum()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// `+` `-`
    pub(crate) fn parse_sum(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.match_additive_op() {
            self.advance();
            let right = self.parse_term()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// `*` `/` `//` `%` `@`
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            let right = self.parse_factor()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// Unary `+` `-` `~`.
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = self.match_unary_op() {
            let start = self.advance();
            let operand = shroud_stack::ensure_sufficient_stack(|| self.parse_factor())?;
            return Ok(unary(op, operand, start));
        }
        self.parse_power()
    }

    /// `await_primary ['**' factor]`; right-associative through `factor`.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_await_primary()?;
        if !self.eat(&TokenKind::DoubleStar) {
            return Ok(base);
        }
        let exponent = shroud_stack::ensure_sufficient_stack(|| self.parse_factor())?;
        Ok(binary(base, shroud_ir::BinaryOp::Pow, exponent))
    }

    fn parse_await_primary(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Await) {
            let start = self.advance();
            let value = self.parse_primary()?;
            let span = start.merge(value.span);
            return Ok(Expr::new(ExprKind::Await(Box::new(value)), span));
        }
        self.parse_primary()
    }

    /// Targets of `for`, comprehensions and `del`: comma-separated
    /// `'*'? bitwise_or`, a tuple when more than one. Stops before `in`.
    pub(crate) fn parse_target_list(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_target()?;
        let mut target = if self.check(&TokenKind::Comma) {
            let mut elts = vec![first];
            while self.eat(&TokenKind::Comma) {
                if self.check(&TokenKind::In) || !self.can_start_expression() {
                    break;
                }
                elts.push(self.parse_target()?);
            }
            tuple(elts)
        } else {
            first
        };
        set_context(&mut target, ExprContext::Store)?;
        Ok(target)
    }

    /// A single target without the tuple-forming comma.
    pub(crate) fn parse_target(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Star) {
            self.parse_starred()
        } else {
            self.parse_bitor()
        }
    }

    /// Whether the current token can begin an expression.
    pub(crate) fn can_start_expression(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Name(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Imaginary(_)
                | TokenKind::Str(_)
                | TokenKind::Bytes(_)
                | TokenKind::FString(_)
                | TokenKind::None
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Ellipsis
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Minus
                | TokenKind::Plus
                | TokenKind::Tilde
                | TokenKind::Not
                | TokenKind::Lambda
                | TokenKind::Await
                | TokenKind::Star
        )
    }
}

fn binary(left: Expr, op: shroud_ir::BinaryOp, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        span,
    )
}

fn unary(op: UnaryOp, operand: Expr, start: Span) -> Expr {
    let span = start.merge(operand.span);
    Expr::new(
        ExprKind::UnaryOp {
            op,
            operand: Box::new(operand),
        },
        span,
    )
}

fn bool_op(op: BoolOp, values: Vec<Expr>) -> Expr {
    let span = match (values.first(), values.last()) {
        (Some(first), Some(last)) => first.span.merge(last.span),
        _ => Span::DUMMY,
    };
    Expr::new(ExprKind::BoolOp { op, values }, span)
}

/// Load-context tuple spanning its elements.
pub(crate) fn tuple(elts: Vec<Expr>) -> Expr {
    let span = match (elts.first(), elts.last()) {
        (Some(first), Some(last)) => first.span.merge(last.span),
        _ => Span::DUMMY,
    };
    Expr::new(
        ExprKind::Tuple {
            elts,
            ctx: ExprContext::Load,
        },
        span,
    )
}
