//! Compound statements: blocks, control flow, definitions and decorators.

use shroud_ir::{
    ClassDef, ExceptHandler, Expr, ExprContext, ExprKind, FunctionDef, Stmt, StmtKind, TokenKind,
    WithItem,
};

use crate::target::set_context;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse a compound statement if one starts here.
    pub(crate) fn parse_compound_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::If => {
                self.advance();
                self.parse_if_rest()?
            }
            TokenKind::While => self.parse_while()?,
            TokenKind::For => self.parse_for(false)?,
            TokenKind::Try => self.parse_try()?,
            TokenKind::With => self.parse_with(false)?,
            TokenKind::Def => self.parse_function_def(Vec::new(), false)?,
            TokenKind::Class => self.parse_class_def(Vec::new())?,
            TokenKind::At => self.parse_decorated()?,
            TokenKind::Name(name) if name == "match" => match self.try_parse_match()? {
                Some(kind) => kind,
                None => return Ok(None),
            },
            TokenKind::Async => match self.peek_kind(1) {
                TokenKind::Def => {
                    self.advance();
                    self.parse_function_def(Vec::new(), true)?
                }
                TokenKind::For => {
                    self.advance();
                    self.parse_for(true)?
                }
                TokenKind::With => {
                    self.advance();
                    self.parse_with(true)?
                }
                _ => return Ok(None),
            },
            _ => return Ok(None),
        };
        Ok(Some(Stmt::new(kind, start.merge(self.previous_span()))))
    }

    /// `':' block`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::Colon, "':'")?;
        let mut body = Vec::new();
        if !self.eat(&TokenKind::Newline) {
            self.parse_simple_statements(&mut body)?;
            return Ok(body);
        }
        if !self.eat(&TokenKind::Indent) {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedIndentedBlock,
                self.current_span(),
            ));
        }
        while !self.eat(&TokenKind::Dedent) {
            match self.current_kind() {
                TokenKind::Eof => break,
                TokenKind::Indent => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedIndent,
                        self.current_span(),
                    ));
                }
                _ => self.parse_statement(&mut body)?,
            }
        }
        Ok(body)
    }

    /// After `if`/`elif`: `named_expression block [elif ... | else block]`
    fn parse_if_rest(&mut self) -> Result<StmtKind, ParseError> {
        let test = self.parse_named_expression()?;
        let body = self.parse_block()?;
        let orelse = match self.current_kind() {
            TokenKind::Elif => {
                let start = self.advance();
                let kind = self.parse_if_rest()?;
                vec![Stmt::new(kind, start.merge(self.previous_span()))]
            }
            TokenKind::Else => {
                self.advance();
                self.parse_block()?
            }
            _ => Vec::new(),
        };
        Ok(StmtKind::If { test, body, orelse })
    }

    fn parse_else_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        if self.eat(&TokenKind::Else) {
            self.parse_block()
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_while(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let test = self.parse_named_expression()?;
        let body = self.parse_block()?;
        let orelse = self.parse_else_block()?;
        Ok(StmtKind::While { test, body, orelse })
    }

    fn parse_for(&mut self, is_async: bool) -> Result<StmtKind, ParseError> {
        self.advance();
        let target = self.parse_target_list()?;
        self.expect(&TokenKind::In, "'in'")?;
        let iter = self.parse_star_expressions()?;
        let body = self.parse_block()?;
        let orelse = self.parse_else_block()?;
        Ok(StmtKind::For {
            target,
            iter,
            body,
            orelse,
            is_async,
        })
    }

    fn parse_try(&mut self) -> Result<StmtKind, ParseError> {
        let try_span = self.advance();
        let body = self.parse_block()?;

        let mut handlers = Vec::new();
        let mut is_star = false;
        while self.check(&TokenKind::Except) {
            let start = self.advance();
            let star = self.eat(&TokenKind::Star);
            if handlers.is_empty() {
                is_star = star;
            } else if star != is_star {
                return Err(ParseError::new(
                    ParseErrorKind::MixedExceptStar,
                    start.merge(self.previous_span()),
                ));
            }
            let mut type_ = None;
            let mut name = None;
            if !self.check(&TokenKind::Colon) {
                type_ = Some(self.parse_expression()?);
                if self.eat(&TokenKind::As) {
                    name = Some(self.expect_name()?.0);
                }
            }
            let handler_body = self.parse_block()?;
            handlers.push(ExceptHandler {
                type_,
                name,
                body: handler_body,
                span: start.merge(self.previous_span()),
            });
        }

        let orelse = if handlers.is_empty() {
            Vec::new()
        } else {
            self.parse_else_block()?
        };
        let finalbody = if self.eat(&TokenKind::Finally) {
            self.parse_block()?
        } else {
            Vec::new()
        };
        if handlers.is_empty() && finalbody.is_empty() {
            return Err(ParseError::unexpected(
                "'except' or 'finally'",
                self.current_kind(),
                try_span.merge(self.current_span()),
            ));
        }
        Ok(StmtKind::Try {
            body,
            handlers,
            orelse,
            finalbody,
            is_star,
        })
    }

    fn parse_with(&mut self, is_async: bool) -> Result<StmtKind, ParseError> {
        self.advance();
        let items = match self.try_parse_parenthesized_with_items()? {
            Some(items) => items,
            None => self.parse_with_items()?,
        };
        let body = self.parse_block()?;
        Ok(StmtKind::With {
            items,
            body,
            is_async,
        })
    }

    /// `with (a as b, c):` form. Backtracks when the parentheses turn out to
    /// belong to the first context expression, as in `with (a, b) as c:`.
    fn try_parse_parenthesized_with_items(&mut self) -> Result<Option<Vec<WithItem>>, ParseError> {
        if !self.check(&TokenKind::LParen) {
            return Ok(None);
        }
        let checkpoint = self.cursor.position();
        self.advance();
        match self.parse_with_item_group() {
            Ok(Some(items)) => Ok(Some(items)),
            Ok(None) | Err(_) => {
                self.cursor.set_position(checkpoint);
                Ok(None)
            }
        }
    }

    /// Items between the parentheses of `with ( ... ):`; `None` if the
    /// group is not a with-item list.
    fn parse_with_item_group(&mut self) -> Result<Option<Vec<WithItem>>, ParseError> {
        let mut items = Vec::new();
        while !self.check(&TokenKind::RParen) {
            items.push(self.parse_with_item()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;
        Ok((!items.is_empty() && self.check(&TokenKind::Colon)).then_some(items))
    }

    fn parse_with_items(&mut self) -> Result<Vec<WithItem>, ParseError> {
        let mut items = vec![self.parse_with_item()?];
        while self.eat(&TokenKind::Comma) {
            items.push(self.parse_with_item()?);
        }
        Ok(items)
    }

    fn parse_with_item(&mut self) -> Result<WithItem, ParseError> {
        let context_expr = self.parse_expression()?;
        let optional_vars = if self.eat(&TokenKind::As) {
            let mut target = self.parse_target()?;
            set_context(&mut target, ExprContext::Store)?;
            Some(target)
        } else {
            None
        };
        Ok(WithItem {
            context_expr,
            optional_vars,
        })
    }

    /// `('@' named_expression NEWLINE)+` followed by a definition.
    fn parse_decorated(&mut self) -> Result<StmtKind, ParseError> {
        let mut decorators = Vec::new();
        while self.eat(&TokenKind::At) {
            decorators.push(self.parse_named_expression()?);
            self.expect(&TokenKind::Newline, "newline")?;
        }
        match self.current_kind() {
            TokenKind::Def => self.parse_function_def(decorators, false),
            TokenKind::Class => self.parse_class_def(decorators),
            TokenKind::Async if self.peek_kind(1) == &TokenKind::Def => {
                self.advance();
                self.parse_function_def(decorators, true)
            }
            _ => Err(self.unexpected("'def' or 'class'")),
        }
    }

    fn parse_function_def(
        &mut self,
        decorators: Vec<Expr>,
        is_async: bool,
    ) -> Result<StmtKind, ParseError> {
        self.expect(&TokenKind::Def, "'def'")?;
        let (name, _) = self.expect_name()?;
        self.expect(&TokenKind::LParen, "'('")?;
        let args = self.parse_parameters(&TokenKind::RParen, true)?;
        self.expect(&TokenKind::RParen, "')'")?;
        let returns = if self.eat(&TokenKind::Arrow) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let body = self.parse_block()?;
        Ok(StmtKind::FunctionDef(Box::new(FunctionDef {
            name,
            args,
            body,
            decorators,
            returns,
            is_async,
        })))
    }

    fn parse_class_def(&mut self, decorators: Vec<Expr>) -> Result<StmtKind, ParseError> {
        self.expect(&TokenKind::Class, "'class'")?;
        let (name, _) = self.expect_name()?;
        let (bases, keywords) = if self.eat(&TokenKind::LParen) {
            let (bases, keywords) = self.parse_call_arguments()?;
            self.expect(&TokenKind::RParen, "')'")?;
            (bases, keywords)
        } else {
            (Vec::new(), Vec::new())
        };
        if let Some(genexp) = bases
            .iter()
            .find(|base| matches!(base.kind, ExprKind::GeneratorExp { .. }))
        {
            return Err(ParseError::new(
                ParseErrorKind::Misplaced("generator expression"),
                genexp.span,
            ));
        }
        let body = self.parse_block()?;
        Ok(StmtKind::ClassDef(Box::new(ClassDef {
            name,
            bases,
            keywords,
            body,
            decorators,
        })))
    }
}
