//! Pre-order tree walk that applies one rewrite rule per node.
//!
//! Each node is matched by kind and context to at most one rule in
//! [`crate::rules`]; after a replacement the walk continues into the
//! children of the new node. Raw leaves have no children, so synthesized
//! text is never rewritten twice.
//!
//! Expressions inside f-string slots are rewritten in alias-only mode: a
//! rule may substitute an alias name but never splice quoted text, since a
//! slot cannot hold backslashes or the enclosing quote on older runtimes.

use shroud_ir::{
    Arguments, BigInt, Comprehension, ExceptHandler, Expr, ExprKind, FStringPart, Module, Stmt,
    StmtKind,
};

use crate::config::{Categories, ObfuscateConfig};
use crate::encode::Encoder;
use crate::header::HeaderTable;
use crate::lut::{AliasTable, ModuleAliasTable, ProgramFacts};
use crate::ObfuscateError;

/// Rewrite state for one run.
pub struct Rewriter<'a> {
    pub(crate) categories: Categories,
    pub(crate) facts: &'a ProgramFacts,
    pub(crate) table: &'a AliasTable,
    pub(crate) modules: &'a ModuleAliasTable,
    pub(crate) encoder: Encoder,
    pub(crate) header: HeaderTable,
    slot_depth: usize,
}

impl<'a> Rewriter<'a> {
    pub fn new(
        config: &ObfuscateConfig,
        facts: &'a ProgramFacts,
        table: &'a AliasTable,
        modules: &'a ModuleAliasTable,
    ) -> Self {
        let zero = table.int(&BigInt::from(0)).unwrap_or_default();
        let one = table.int(&BigInt::from(1)).unwrap_or_default();
        Rewriter {
            categories: config.categories(),
            facts,
            table,
            modules,
            encoder: Encoder::new(zero, one, config.string_mode()),
            header: HeaderTable::new(),
            slot_depth: 0,
        }
    }

    /// Header entries registered so far.
    pub fn header(&self) -> &HeaderTable {
        &self.header
    }

    pub fn into_header(self) -> HeaderTable {
        self.header
    }

    pub(crate) fn enabled(&self, category: Categories) -> bool {
        self.categories.contains(category)
    }

    /// Whether the walk is inside an f-string slot.
    pub(crate) fn in_slot(&self) -> bool {
        self.slot_depth > 0
    }

    /// Rewrite every statement of `module`. The root itself and its
    /// docstring are left alone: the prologue goes after the docstring.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = module.body.len()))]
    pub fn rewrite_module(&mut self, module: &mut Module) -> Result<(), ObfuscateError> {
        let keep_docstring = module.body.first().is_some_and(Stmt::is_docstring);
        let stmts = std::mem::take(&mut module.body);
        for (index, mut stmt) in stmts.into_iter().enumerate() {
            if (index == 0 && keep_docstring) || self.stmt(&mut stmt)? {
                module.body.push(stmt);
            }
        }
        tracing::debug!(header = self.header.len(), "module rewritten");
        Ok(())
    }

    /// Rewrite a nested block; an emptied block gets `pass`.
    fn block(&mut self, body: &mut Vec<Stmt>) -> Result<(), ObfuscateError> {
        let was_empty = body.is_empty();
        let stmts = std::mem::take(body);
        for mut stmt in stmts {
            if self.stmt(&mut stmt)? {
                body.push(stmt);
            }
        }
        if body.is_empty() && !was_empty {
            body.push(Stmt::new(StmtKind::Pass, shroud_ir::Span::DUMMY));
        }
        Ok(())
    }

    fn exprs(&mut self, exprs: &mut [Expr]) -> Result<(), ObfuscateError> {
        for expr in exprs {
            self.expr(expr)?;
        }
        Ok(())
    }

    fn opt_expr(&mut self, expr: Option<&mut Expr>) -> Result<(), ObfuscateError> {
        match expr {
            Some(expr) => self.expr(expr),
            None => Ok(()),
        }
    }

    /// Returns `false` when the statement should be dropped.
    fn stmt(&mut self, stmt: &mut Stmt) -> Result<bool, ObfuscateError> {
        shroud_stack::ensure_sufficient_stack(|| {
            match &mut stmt.kind {
                StmtKind::FunctionDef(def) => {
                    self.rename_function(&mut def.name);
                    self.exprs(&mut def.decorators)?;
                    self.arguments(&mut def.args)?;
                    self.opt_expr(def.returns.as_mut())?;
                    self.block(&mut def.body)?;
                }
                StmtKind::ClassDef(def) => {
                    self.rename_class(&mut def.name);
                    self.exprs(&mut def.decorators)?;
                    self.exprs(&mut def.bases)?;
                    for keyword in &mut def.keywords {
                        self.expr(&mut keyword.value)?;
                    }
                    self.block(&mut def.body)?;
                }
                StmtKind::Return(value) => self.opt_expr(value.as_mut())?,
                StmtKind::Delete(targets) => self.exprs(targets)?,
                StmtKind::Assign { targets, value } => {
                    self.exprs(targets)?;
                    self.expr(value)?;
                }
                StmtKind::AugAssign { target, value, .. } => {
                    self.expr(target)?;
                    self.expr(value)?;
                }
                StmtKind::AnnAssign {
                    target,
                    annotation,
                    value,
                    ..
                } => {
                    self.expr(target)?;
                    self.expr(annotation)?;
                    self.opt_expr(value.as_mut())?;
                }
                StmtKind::For {
                    target,
                    iter,
                    body,
                    orelse,
                    ..
                } => {
                    self.expr(target)?;
                    self.expr(iter)?;
                    self.block(body)?;
                    self.block(orelse)?;
                }
                StmtKind::While { test, body, orelse } | StmtKind::If { test, body, orelse } => {
                    self.expr(test)?;
                    self.block(body)?;
                    self.block(orelse)?;
                }
                StmtKind::With { items, body, .. } => {
                    for item in items {
                        self.expr(&mut item.context_expr)?;
                        self.opt_expr(item.optional_vars.as_mut())?;
                    }
                    self.block(body)?;
                }
                StmtKind::Raise { exc, cause } => {
                    self.opt_expr(exc.as_mut())?;
                    self.opt_expr(cause.as_mut())?;
                }
                StmtKind::Try {
                    body,
                    handlers,
                    orelse,
                    finalbody,
                    ..
                } => {
                    self.block(body)?;
                    for handler in handlers {
                        self.except_handler(handler)?;
                    }
                    self.block(orelse)?;
                    self.block(finalbody)?;
                }
                StmtKind::Match { subject, cases } => {
                    self.expr(subject)?;
                    for case in cases {
                        self.pattern(&mut case.pattern);
                        self.opt_expr(case.guard.as_mut())?;
                        self.block(&mut case.body)?;
                    }
                }
                StmtKind::TypeAlias { name, value } => {
                    self.expr(name)?;
                    self.expr(value)?;
                }
                StmtKind::Assert { test, msg } => {
                    self.expr(test)?;
                    self.opt_expr(msg.as_mut())?;
                }
                StmtKind::Import(names) => return Ok(self.import(names)),
                StmtKind::ImportFrom { module, names, .. } => {
                    self.import_from(module.as_deref(), names);
                }
                StmtKind::Global(names) | StmtKind::Nonlocal(names) => {
                    self.rename_declared(names);
                }
                StmtKind::Expr(value) => self.expr(value)?,
                StmtKind::Pass | StmtKind::Break | StmtKind::Continue => {}
            }
            Ok(true)
        })
    }

    fn except_handler(&mut self, handler: &mut ExceptHandler) -> Result<(), ObfuscateError> {
        if let Some(name) = &mut handler.name {
            self.rename_bare(name);
        }
        self.opt_expr(handler.type_.as_mut())?;
        self.block(&mut handler.body)
    }

    fn arguments(&mut self, args: &mut Arguments) -> Result<(), ObfuscateError> {
        for param in args.iter_mut() {
            self.rename_parameter(&mut param.name);
            self.opt_expr(param.annotation.as_mut())?;
            self.opt_expr(param.default.as_mut())?;
        }
        Ok(())
    }

    fn comprehensions(&mut self, generators: &mut [Comprehension]) -> Result<(), ObfuscateError> {
        for comp in generators {
            self.expr(&mut comp.target)?;
            self.expr(&mut comp.iter)?;
            self.exprs(&mut comp.ifs)?;
        }
        Ok(())
    }

    /// Apply the rule for `expr`, then walk the children of the result.
    pub fn expr(&mut self, expr: &mut Expr) -> Result<(), ObfuscateError> {
        shroud_stack::ensure_sufficient_stack(|| {
            self.apply(expr)?;
            self.children(expr)
        })
    }

    /// At most one rule per node, chosen by kind and context.
    fn apply(&mut self, expr: &mut Expr) -> Result<(), ObfuscateError> {
        match &expr.kind {
            ExprKind::Constant(_) => self.constant(expr),
            ExprKind::FString(_) => self.fstring_literals(expr),
            ExprKind::Name { .. } => {
                self.name(expr);
                Ok(())
            }
            ExprKind::Attribute { .. } => {
                self.attribute(expr);
                Ok(())
            }
            ExprKind::Call { .. } => {
                self.call(expr);
                Ok(())
            }
            _ => {
                tracing::trace!(span = ?expr.span, "no rule");
                Ok(())
            }
        }
    }

    fn children(&mut self, expr: &mut Expr) -> Result<(), ObfuscateError> {
        match &mut expr.kind {
            ExprKind::BoolOp { values, .. } => self.exprs(values),
            ExprKind::NamedExpr { target, value } => {
                self.expr(target)?;
                self.expr(value)
            }
            ExprKind::BinOp { left, right, .. } => {
                self.expr(left)?;
                self.expr(right)
            }
            ExprKind::UnaryOp { operand, .. } => self.expr(operand),
            ExprKind::Lambda { args, body } => {
                self.arguments(args)?;
                self.expr(body)
            }
            ExprKind::IfExp { test, body, orelse } => {
                self.expr(test)?;
                self.expr(body)?;
                self.expr(orelse)
            }
            ExprKind::Dict { keys, values } => {
                for key in keys.iter_mut().flatten() {
                    self.expr(key)?;
                }
                self.exprs(values)
            }
            ExprKind::Set(elts)
            | ExprKind::List { elts, .. }
            | ExprKind::Tuple { elts, .. } => self.exprs(elts),
            ExprKind::ListComp { elt, generators }
            | ExprKind::SetComp { elt, generators }
            | ExprKind::GeneratorExp { elt, generators } => {
                self.comprehensions(generators)?;
                self.expr(elt)
            }
            ExprKind::DictComp {
                key,
                value,
                generators,
            } => {
                self.comprehensions(generators)?;
                self.expr(key)?;
                self.expr(value)
            }
            ExprKind::Await(value) | ExprKind::YieldFrom(value) => self.expr(value),
            ExprKind::Yield(value) => match value {
                Some(value) => self.expr(value),
                None => Ok(()),
            },
            ExprKind::Compare {
                left, comparators, ..
            } => {
                self.expr(left)?;
                self.exprs(comparators)
            }
            ExprKind::Call {
                func,
                args,
                keywords,
            } => {
                self.expr(func)?;
                self.exprs(args)?;
                for keyword in keywords {
                    self.expr(&mut keyword.value)?;
                }
                Ok(())
            }
            ExprKind::FString(parts) => {
                self.slot_depth += 1;
                let result = self.fstring_slots(parts);
                self.slot_depth -= 1;
                result
            }
            ExprKind::Attribute { value, .. } | ExprKind::Starred { value, .. } => {
                self.expr(value)
            }
            ExprKind::Subscript { value, slice, .. } => {
                self.expr(value)?;
                self.expr(slice)
            }
            ExprKind::Slice { lower, upper, step } => {
                for bound in [lower, upper, step].into_iter().flatten() {
                    self.expr(bound)?;
                }
                Ok(())
            }
            ExprKind::Constant(_) | ExprKind::Name { .. } | ExprKind::Raw(_) => Ok(()),
        }
    }

    fn fstring_slots(&mut self, parts: &mut [FStringPart]) -> Result<(), ObfuscateError> {
        for part in parts {
            if let FStringPart::Slot(slot) = part {
                self.expr(&mut slot.value)?;
                self.fstring_slots(&mut slot.format_spec)?;
            }
        }
        Ok(())
    }
}
