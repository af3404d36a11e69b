//! Whole-program name facts shared by the collectors and the rewriter.

use rustc_hash::FxHashSet;
use shroud_ir::visitor::{walk_expr, walk_pattern, walk_stmt, Visitor};
use shroud_ir::{
    Alias, ExceptHandler, Expr, ExprContext, ExprKind, Module, Parameter, Pattern, PatternKind,
    Stmt, StmtKind,
};

/// Names the program binds, defines or mentions.
#[derive(Debug, Default)]
pub struct ProgramFacts {
    /// Every identifier spelled anywhere in the input.
    pub identifiers: FxHashSet<String>,
    /// Every name bound by any construct, imports included.
    pub bound: FxHashSet<String>,
    /// Bindings introduced by whole-module `import` statements.
    pub module_imports: FxHashSet<String>,
    /// Bare names bound by the program itself: definitions, assignment
    /// targets and parameters, but not imports.
    pub local_callables: FxHashSet<String>,
    /// Function and class definition names.
    pub definitions: FxHashSet<String>,
    /// Names reachable as attributes of program objects: definitions,
    /// class-body bindings and `self.x` attributes.
    pub defined_attrs: FxHashSet<String>,
}

impl ProgramFacts {
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn scan(module: &Module) -> Self {
        let mut facts = ProgramFacts::default();
        facts.visit_module(module);
        facts.scan_imports(&module.body);
        facts
    }

    fn mention(&mut self, name: &str) {
        if !self.identifiers.contains(name) {
            self.identifiers.insert(name.to_string());
        }
    }

    fn bind_local(&mut self, name: &str) {
        self.mention(name);
        self.bound.insert(name.to_string());
        self.local_callables.insert(name.to_string());
    }

    fn define(&mut self, name: &str) {
        self.bind_local(name);
        self.definitions.insert(name.to_string());
        self.defined_attrs.insert(name.to_string());
    }

    fn class_body_bindings(&mut self, body: &[Stmt]) {
        for stmt in body {
            let mut names = Vec::new();
            match &stmt.kind {
                StmtKind::Assign { targets, .. } => {
                    for target in targets {
                        target_names(target, &mut names);
                    }
                }
                StmtKind::AugAssign { target, .. } | StmtKind::AnnAssign { target, .. } => {
                    target_names(target, &mut names);
                }
                _ => {}
            }
            for name in names {
                self.defined_attrs.insert(name.to_string());
            }
        }
    }
}

/// Names bound by an assignment target, through tuple and list unpacking.
pub(crate) fn target_names<'a>(target: &'a Expr, out: &mut Vec<&'a str>) {
    match &target.kind {
        ExprKind::Name { id, .. } => out.push(id),
        ExprKind::Tuple { elts, .. } | ExprKind::List { elts, .. } => {
            for elt in elts {
                target_names(elt, out);
            }
        }
        ExprKind::Starred { value, .. } => target_names(value, out),
        _ => {}
    }
}

/// Whether `expr` is the bare name `self`.
pub(crate) fn is_self(expr: &Expr) -> bool {
    expr.as_name() == Some("self")
}

impl<'ast> Visitor<'ast> for ProgramFacts {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match &stmt.kind {
            StmtKind::FunctionDef(def) => self.define(&def.name),
            StmtKind::ClassDef(def) => {
                self.define(&def.name);
                self.class_body_bindings(&def.body);
            }
            StmtKind::Global(names) | StmtKind::Nonlocal(names) => {
                for name in names {
                    self.mention(name);
                }
            }
            StmtKind::ImportFrom {
                module: Some(path),
                ..
            } => {
                for part in path.split('.') {
                    self.mention(part);
                }
            }
            _ => {}
        }
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        match &expr.kind {
            ExprKind::Name { id, ctx } => {
                if *ctx == ExprContext::Load {
                    self.mention(id);
                } else {
                    self.bind_local(id);
                }
            }
            ExprKind::Attribute { value, attr, .. } => {
                self.mention(attr);
                if is_self(value) {
                    self.defined_attrs.insert(attr.clone());
                }
            }
            _ => {}
        }
        walk_expr(self, expr);
    }

    fn visit_parameter(&mut self, param: &'ast Parameter) {
        if param.name == "self" {
            self.mention(&param.name);
        } else {
            self.bind_local(&param.name);
        }
        shroud_ir::visitor::walk_parameter(self, param);
    }

    fn visit_keyword(&mut self, keyword: &'ast shroud_ir::Keyword) {
        if let Some(arg) = &keyword.arg {
            self.mention(arg);
        }
        self.visit_expr(&keyword.value);
    }

    fn visit_except_handler(&mut self, handler: &'ast ExceptHandler) {
        if let Some(name) = &handler.name {
            self.bind_local(name);
        }
        shroud_ir::visitor::walk_except_handler(self, handler);
    }

    fn visit_pattern(&mut self, pattern: &'ast Pattern) {
        match &pattern.kind {
            PatternKind::Star(Some(name))
            | PatternKind::As {
                name: Some(name), ..
            }
            | PatternKind::Mapping {
                rest: Some(name), ..
            } => self.bind_local(name),
            PatternKind::Class { kwd_attrs, .. } => {
                for attr in kwd_attrs {
                    self.mention(attr);
                }
            }
            _ => {}
        }
        walk_pattern(self, pattern);
    }

    fn visit_alias(&mut self, alias: &'ast Alias) {
        for part in alias.name.split('.') {
            self.mention(part);
        }
        let binding = alias.binding();
        self.mention(binding);
        self.bound.insert(binding.to_string());
    }
}

impl ProgramFacts {
    /// Record whole-module import bindings; `visit_alias` cannot tell the
    /// two import forms apart.
    fn scan_imports(&mut self, body: &[Stmt]) {
        for stmt in body {
            match &stmt.kind {
                StmtKind::Import(names) => {
                    for alias in names {
                        self.module_imports.insert(alias.binding().to_string());
                    }
                }
                StmtKind::FunctionDef(def) => self.scan_imports(&def.body),
                StmtKind::ClassDef(def) => self.scan_imports(&def.body),
                StmtKind::If { body, orelse, .. }
                | StmtKind::While { body, orelse, .. }
                | StmtKind::For { body, orelse, .. } => {
                    self.scan_imports(body);
                    self.scan_imports(orelse);
                }
                StmtKind::With { body, .. } => self.scan_imports(body),
                StmtKind::Try {
                    body,
                    handlers,
                    orelse,
                    finalbody,
                    ..
                } => {
                    self.scan_imports(body);
                    for handler in handlers {
                        self.scan_imports(&handler.body);
                    }
                    self.scan_imports(orelse);
                    self.scan_imports(finalbody);
                }
                StmtKind::Match { cases, .. } => {
                    for case in cases {
                        self.scan_imports(&case.body);
                    }
                }
                _ => {}
            }
        }
    }
}
