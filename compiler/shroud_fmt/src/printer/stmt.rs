//! Statement Printing
//!
//! One statement per line. Compound statements print their header, then the
//! body one level deeper. An `else` block holding a lone `if` prints as
//! `elif`. Function and class definitions after other output are preceded by
//! a blank line.

use shroud_ir::{Alias, ExceptHandler, Expr, ExprKind, Module, Stmt, StmtKind, WithItem};

use super::Printer;
use crate::emitter::Emitter;
use crate::precedence::Precedence;

impl<E: Emitter> Printer<E> {
    pub fn module(&mut self, module: &Module) {
        for stmt in &module.body {
            self.stmt(stmt);
        }
    }

    pub fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::FunctionDef(def) => {
                self.blank_line_before_definition();
                self.decorators(&def.decorators);
                self.start_line();
                if def.is_async {
                    self.emit("async ");
                }
                self.emit("def ");
                self.emit(&def.name);
                self.emit("(");
                self.arguments(&def.args, true);
                self.emit(")");
                if let Some(returns) = &def.returns {
                    self.emit(" -> ");
                    self.expr(returns, Precedence::Test);
                }
                self.block(&def.body);
            }
            StmtKind::ClassDef(def) => {
                self.blank_line_before_definition();
                self.decorators(&def.decorators);
                self.start_line();
                self.emit("class ");
                self.emit(&def.name);
                if !def.bases.is_empty() || !def.keywords.is_empty() {
                    self.emit("(");
                    self.comma_separated(&def.bases, |p, base| p.expr(base, Precedence::Test));
                    if !def.bases.is_empty() && !def.keywords.is_empty() {
                        self.emit(", ");
                    }
                    self.comma_separated(&def.keywords, |p, keyword| {
                        match &keyword.arg {
                            Some(arg) => {
                                p.emit(arg);
                                p.emit("=");
                            }
                            None => p.emit("**"),
                        }
                        p.expr(&keyword.value, Precedence::Test);
                    });
                    self.emit(")");
                }
                self.block(&def.body);
            }
            StmtKind::If { test, body, orelse } => {
                self.start_line();
                self.emit("if ");
                self.expr(test, Precedence::NamedExpr);
                self.block(body);
                self.if_rest(orelse);
            }
            StmtKind::While { test, body, orelse } => {
                self.start_line();
                self.emit("while ");
                self.expr(test, Precedence::NamedExpr);
                self.block(body);
                self.else_block(orelse);
            }
            StmtKind::For {
                target,
                iter,
                body,
                orelse,
                is_async,
            } => {
                self.start_line();
                self.emit(if *is_async { "async for " } else { "for " });
                self.expr(target, Precedence::Tuple);
                self.emit(" in ");
                self.expr(iter, Precedence::Test);
                self.block(body);
                self.else_block(orelse);
            }
            StmtKind::With {
                items,
                body,
                is_async,
            } => {
                self.start_line();
                self.emit(if *is_async { "async with " } else { "with " });
                self.comma_separated(items, Self::with_item);
                self.block(body);
            }
            StmtKind::Try {
                body,
                handlers,
                orelse,
                finalbody,
                is_star,
            } => {
                self.start_line();
                self.emit("try");
                self.block(body);
                for handler in handlers {
                    self.except_handler(handler, *is_star);
                }
                self.else_block(orelse);
                if !finalbody.is_empty() {
                    self.start_line();
                    self.emit("finally");
                    self.block(finalbody);
                }
            }
            StmtKind::Match { subject, cases } => {
                self.start_line();
                self.emit("match ");
                self.expr(subject, Precedence::NamedExpr);
                self.emit(":");
                self.end_line();
                self.indent += 1;
                for case in cases {
                    self.match_case(case);
                }
                self.indent -= 1;
            }
            _ => {
                self.start_line();
                self.simple_stmt(&stmt.kind);
                self.end_line();
            }
        }
    }

    fn simple_stmt(&mut self, kind: &StmtKind) {
        match kind {
            StmtKind::Return(value) => {
                self.emit("return");
                if let Some(value) = value {
                    self.emit(" ");
                    self.expr(value, Precedence::Test);
                }
            }
            StmtKind::Delete(targets) => {
                self.emit("del ");
                self.comma_separated(targets, |p, target| p.expr(target, Precedence::Test));
            }
            StmtKind::Assign { targets, value } => {
                for target in targets {
                    self.expr(target, Precedence::Test);
                    self.emit(" = ");
                }
                self.expr(value, Precedence::Yield);
            }
            StmtKind::AugAssign { target, op, value } => {
                self.expr(target, Precedence::Test);
                self.emit(" ");
                self.emit(&op.aug_symbol());
                self.emit(" ");
                self.expr(value, Precedence::Yield);
            }
            StmtKind::AnnAssign {
                target,
                annotation,
                value,
                simple,
            } => {
                let parens = !simple && matches!(target.kind, ExprKind::Name { .. });
                if parens {
                    self.emit("(");
                }
                self.expr(target, Precedence::Test);
                if parens {
                    self.emit(")");
                }
                self.emit(": ");
                self.expr(annotation, Precedence::Test);
                if let Some(value) = value {
                    self.emit(" = ");
                    self.expr(value, Precedence::Yield);
                }
            }
            StmtKind::Raise { exc, cause } => {
                self.emit("raise");
                if let Some(exc) = exc {
                    self.emit(" ");
                    self.expr(exc, Precedence::Test);
                }
                if let Some(cause) = cause {
                    self.emit(" from ");
                    self.expr(cause, Precedence::Test);
                }
            }
            StmtKind::Assert { test, msg } => {
                self.emit("assert ");
                self.expr(test, Precedence::Test);
                if let Some(msg) = msg {
                    self.emit(", ");
                    self.expr(msg, Precedence::Test);
                }
            }
            StmtKind::Import(names) => {
                self.emit("import ");
                self.comma_separated(names, Self::alias);
            }
            StmtKind::ImportFrom {
                module,
                names,
                level,
            } => {
                self.emit("from ");
                for _ in 0..*level {
                    self.emit(".");
                }
                if let Some(module) = module {
                    self.emit(module);
                }
                self.emit(" import ");
                self.comma_separated(names, Self::alias);
            }
            StmtKind::Global(names) => {
                self.emit("global ");
                self.comma_separated(names, |p, name| p.emit(name));
            }
            StmtKind::Nonlocal(names) => {
                self.emit("nonlocal ");
                self.comma_separated(names, |p, name| p.emit(name));
            }
            StmtKind::Expr(value) => self.expr(value, Precedence::Yield),
            StmtKind::TypeAlias { name, value } => {
                self.emit("type ");
                self.expr(name, Precedence::Test);
                self.emit(" = ");
                self.expr(value, Precedence::Test);
            }
            StmtKind::Pass => self.emit("pass"),
            StmtKind::Break => self.emit("break"),
            StmtKind::Continue => self.emit("continue"),
            StmtKind::FunctionDef(_)
            | StmtKind::ClassDef(_)
            | StmtKind::If { .. }
            | StmtKind::While { .. }
            | StmtKind::For { .. }
            | StmtKind::With { .. }
            | StmtKind::Try { .. }
            | StmtKind::Match { .. } => {}
        }
    }

    /// `:` and an indented body. An empty body prints as `pass`.
    pub(super) fn block(&mut self, body: &[Stmt]) {
        self.emit(":");
        self.end_line();
        self.indent += 1;
        if body.is_empty() {
            self.start_line();
            self.emit("pass");
            self.end_line();
        }
        for stmt in body {
            self.stmt(stmt);
        }
        self.indent -= 1;
    }

    fn if_rest(&mut self, orelse: &[Stmt]) {
        if let [Stmt {
            kind: StmtKind::If { test, body, orelse },
            ..
        }] = orelse
        {
            self.start_line();
            self.emit("elif ");
            self.expr(test, Precedence::NamedExpr);
            self.block(body);
            self.if_rest(orelse);
        } else {
            self.else_block(orelse);
        }
    }

    fn else_block(&mut self, orelse: &[Stmt]) {
        if !orelse.is_empty() {
            self.start_line();
            self.emit("else");
            self.block(orelse);
        }
    }

    fn except_handler(&mut self, handler: &ExceptHandler, is_star: bool) {
        self.start_line();
        self.emit(if is_star { "except*" } else { "except" });
        if let Some(type_) = &handler.type_ {
            self.emit(" ");
            self.expr(type_, Precedence::Test);
            if let Some(name) = &handler.name {
                self.emit(" as ");
                self.emit(name);
            }
        }
        self.block(&handler.body);
    }

    fn with_item(&mut self, item: &WithItem) {
        self.expr(&item.context_expr, Precedence::Test);
        if let Some(vars) = &item.optional_vars {
            self.emit(" as ");
            self.expr(vars, Precedence::Test);
        }
    }

    fn alias(&mut self, alias: &Alias) {
        self.emit(&alias.name);
        if let Some(asname) = &alias.asname {
            self.emit(" as ");
            self.emit(asname);
        }
    }

    fn decorators(&mut self, decorators: &[Expr]) {
        for decorator in decorators {
            self.start_line();
            self.emit("@");
            self.expr(decorator, Precedence::NamedExpr);
            self.end_line();
        }
    }

    fn blank_line_before_definition(&mut self) {
        if !self.out.is_empty() {
            self.end_line();
        }
    }
}
