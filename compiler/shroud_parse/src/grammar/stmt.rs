//! Simple statements: expression statements, assignments, imports and the
//! keyword statements that fit on one logical line.

use shroud_ir::{Alias, Expr, ExprContext, ExprKind, Stmt, StmtKind, TokenKind};

use crate::target::set_context;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse one statement (compound, or a line of simple statements) and
    /// append the result to `body`.
    pub(crate) fn parse_statement(&mut self, body: &mut Vec<Stmt>) -> Result<(), ParseError> {
        shroud_stack::ensure_sufficient_stack(|| {
            if let Some(stmt) = self.parse_compound_statement()? {
                body.push(stmt);
                return Ok(());
            }
            self.parse_simple_statements(body)
        })
    }

    /// `simple_stmt (';' simple_stmt)* [';'] NEWLINE`
    pub(crate) fn parse_simple_statements(
        &mut self,
        body: &mut Vec<Stmt>,
    ) -> Result<(), ParseError> {
        loop {
            body.push(self.parse_simple_statement()?);
            if !self.eat(&TokenKind::Semicolon) || self.at_statement_end() {
                break;
            }
        }
        match self.current_kind() {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("newline")),
        }
    }

    pub(crate) fn at_statement_end(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof
        )
    }

    fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Pass => {
                self.advance();
                StmtKind::Pass
            }
            TokenKind::Break => {
                self.advance();
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.advance();
                StmtKind::Continue
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.at_statement_end() {
                    None
                } else {
                    Some(self.parse_star_expressions()?)
                };
                StmtKind::Return(value)
            }
            TokenKind::Raise => {
                self.advance();
                let mut exc = None;
                let mut cause = None;
                if !self.at_statement_end() {
                    exc = Some(self.parse_expression()?);
                    if self.eat(&TokenKind::From) {
                        cause = Some(self.parse_expression()?);
                    }
                }
                StmtKind::Raise { exc, cause }
            }
            TokenKind::Global => {
                self.advance();
                StmtKind::Global(self.parse_name_list()?)
            }
            TokenKind::Nonlocal => {
                self.advance();
                StmtKind::Nonlocal(self.parse_name_list()?)
            }
            TokenKind::Del => {
                self.advance();
                let mut targets = Vec::new();
                loop {
                    let mut target = self.parse_target()?;
                    set_context(&mut target, ExprContext::Del)?;
                    targets.push(target);
                    if !self.eat(&TokenKind::Comma) || self.at_statement_end() {
                        break;
                    }
                }
                StmtKind::Delete(targets)
            }
            TokenKind::Assert => {
                self.advance();
                let test = self.parse_expression()?;
                let msg = if self.eat(&TokenKind::Comma) {
                    Some(self.parse_expression()?)
                } else {
                    None
                };
                StmtKind::Assert { test, msg }
            }
            TokenKind::Import => self.parse_import()?,
            TokenKind::From => self.parse_from_import()?,
            TokenKind::Name(soft)
                if soft == "type"
                    && matches!(self.peek_kind(1), TokenKind::Name(_))
                    && self.peek_kind(2) == &TokenKind::Eq =>
            {
                self.advance();
                let (id, span) = self.expect_name()?;
                self.advance();
                let value = self.parse_expression()?;
                StmtKind::TypeAlias {
                    name: Expr::new(
                        ExprKind::Name {
                            id,
                            ctx: ExprContext::Store,
                        },
                        span,
                    ),
                    value,
                }
            }
            _ => self.parse_expression_statement()?,
        };
        Ok(Stmt::new(kind, start.merge(self.previous_span())))
    }

    /// Expression statements and every assignment form.
    fn parse_expression_statement(&mut self) -> Result<StmtKind, ParseError> {
        let parenthesized = self.check(&TokenKind::LParen);
        let mut first = self.parse_assignment_value()?;

        match self.current_kind() {
            TokenKind::Colon => {
                self.advance();
                check_single_target(&first, "annotate")?;
                set_context(&mut first, ExprContext::Store)?;
                let simple = !parenthesized && matches!(first.kind, ExprKind::Name { .. });
                let annotation = self.parse_expression()?;
                let value = if self.eat(&TokenKind::Eq) {
                    Some(self.parse_assignment_value()?)
                } else {
                    None
                };
                Ok(StmtKind::AnnAssign {
                    target: first,
                    annotation,
                    value,
                    simple,
                })
            }
            TokenKind::AugAssign(op) => {
                let op = *op;
                self.advance();
                check_single_target(&first, "assign to")?;
                set_context(&mut first, ExprContext::Store)?;
                let value = self.parse_assignment_value()?;
                Ok(StmtKind::AugAssign {
                    target: first,
                    op,
                    value,
                })
            }
            TokenKind::Eq => {
                let mut exprs = vec![first];
                while self.eat(&TokenKind::Eq) {
                    exprs.push(self.parse_assignment_value()?);
                }
                let Some(value) = exprs.pop() else {
                    return Err(self.unexpected("expression"));
                };
                for target in &mut exprs {
                    set_context(target, ExprContext::Store)?;
                }
                Ok(StmtKind::Assign {
                    targets: exprs,
                    value,
                })
            }
            _ => Ok(StmtKind::Expr(first)),
        }
    }

    /// Right-hand side of an assignment: a yield or a tuple-forming list.
    fn parse_assignment_value(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Yield) {
            self.parse_yield_expression()
        } else {
            self.parse_star_expressions()
        }
    }

    fn parse_name_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = vec![self.expect_name()?.0];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_name()?.0);
        }
        Ok(names)
    }

    /// `import a.b as c, d`
    fn parse_import(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let mut names = Vec::new();
        loop {
            let start = self.current_span();
            let name = self.parse_dotted_name()?;
            let asname = self.parse_as_name()?;
            names.push(Alias {
                name,
                asname,
                span: start.merge(self.previous_span()),
            });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(StmtKind::Import(names))
    }

    /// `from ..pkg.mod import (a as b, c)` / `from . import x` / `from m import *`
    fn parse_from_import(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let mut level = 0;
        loop {
            match self.current_kind() {
                TokenKind::Dot => level += 1,
                TokenKind::Ellipsis => level += 3,
                _ => break,
            }
            self.advance();
        }
        let module = if self.check(&TokenKind::Import) && level > 0 {
            None
        } else {
            Some(self.parse_dotted_name()?)
        };
        self.expect(&TokenKind::Import, "'import'")?;

        if self.check(&TokenKind::Star) {
            let span = self.advance();
            return Ok(StmtKind::ImportFrom {
                module,
                names: vec![Alias {
                    name: "*".to_string(),
                    asname: None,
                    span,
                }],
                level,
            });
        }

        let parenthesized = self.eat(&TokenKind::LParen);
        let mut names = Vec::new();
        loop {
            let (name, start) = self.expect_name()?;
            let asname = self.parse_as_name()?;
            names.push(Alias {
                name,
                asname,
                span: start.merge(self.previous_span()),
            });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
            if parenthesized && self.check(&TokenKind::RParen) {
                break;
            }
        }
        if parenthesized {
            self.expect(&TokenKind::RParen, "')'")?;
        }
        Ok(StmtKind::ImportFrom {
            module,
            names,
            level,
        })
    }

    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_name()?.0;
        while self.eat(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_name()?.0);
        }
        Ok(name)
    }

    fn parse_as_name(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat(&TokenKind::As) {
            Ok(Some(self.expect_name()?.0))
        } else {
            Ok(None)
        }
    }
}

/// Annotated and augmented assignments take exactly one plain target.
fn check_single_target(target: &Expr, action: &'static str) -> Result<(), ParseError> {
    match target.kind {
        ExprKind::Name { .. } | ExprKind::Attribute { .. } | ExprKind::Subscript { .. } => Ok(()),
        ExprKind::Tuple { .. } | ExprKind::List { .. } => Err(ParseError::new(
            ParseErrorKind::InvalidTarget {
                action,
                target: "multiple targets",
            },
            target.span,
        )),
        _ => Err(ParseError::new(
            ParseErrorKind::InvalidTarget {
                action,
                target: "expression",
            },
            target.span,
        )),
    }
}
