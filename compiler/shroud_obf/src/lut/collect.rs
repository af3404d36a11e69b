//! Per-category token collectors.

use rustc_hash::{FxHashMap, FxHashSet};
use shroud_ir::builtins::{is_builtin, is_dunder};
use shroud_ir::visitor::{
    walk_except_handler, walk_expr, walk_parameter, walk_pattern, walk_stmt, Visitor,
};
use shroud_ir::{
    Constant, ExceptHandler, Expr, ExprContext, ExprKind, FStringPart, Module, Parameter, Pattern,
    PatternKind, Stmt, StmtKind,
};

use super::facts::{is_self, target_names, ProgramFacts};
use super::{FloatKey, Namespace, Token};
use crate::config::Categories;

/// Raw output of the collectors, before aliases are assigned.
#[derive(Debug, Default)]
pub(super) struct Collected {
    pub idents: FxHashMap<String, Namespace>,
    pub values: FxHashSet<Token>,
}

impl Collected {
    fn ident(&mut self, name: &str, ns: Namespace) {
        *self.idents.entry(name.to_string()).or_default() |= ns;
    }
}

pub(super) fn collect(module: &Module, facts: &ProgramFacts, categories: Categories) -> Collected {
    let mut out = Collected::default();
    if categories.contains(Categories::VARIABLES) {
        Variables {
            facts,
            out: &mut out,
        }
        .visit_module(module);
    }
    if categories.contains(Categories::FUNCTIONS) {
        Functions {
            facts,
            out: &mut out,
        }
        .visit_module(module);
    }
    if categories.contains(Categories::CLASSES) {
        Classes {
            facts,
            out: &mut out,
        }
        .visit_module(module);
    }
    if categories.contains(Categories::NUMBERS) {
        Numbers { out: &mut out }.visit_module(module);
    }
    if categories.contains(Categories::STRINGS) {
        Strings { out: &mut out }.visit_module(module);
    }

    // A definition is reachable both by its bare name and as an attribute
    // of its owner, whichever category put it in the table.
    for (name, ns) in &mut out.idents {
        if facts.definitions.contains(name) {
            *ns = Namespace::all();
        }
    }
    out
}

/// Names no category may rename.
fn renamable(name: &str, facts: &ProgramFacts) -> bool {
    name != "self"
        && !is_dunder(name)
        && !is_builtin(name)
        && !facts.module_imports.contains(name)
}

struct Variables<'a> {
    facts: &'a ProgramFacts,
    out: &'a mut Collected,
}

impl Variables<'_> {
    fn add(&mut self, name: &str, ns: Namespace) {
        if renamable(name, self.facts) {
            self.out.ident(name, ns);
        }
    }
}

impl<'ast> Visitor<'ast> for Variables<'_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if let StmtKind::ClassDef(def) = &stmt.kind {
            for member in &def.body {
                let mut names = Vec::new();
                match &member.kind {
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
                    self.add(name, Namespace::all());
                }
            }
        }
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        match &expr.kind {
            ExprKind::Name { id, ctx } if *ctx != ExprContext::Load => {
                self.add(id, Namespace::BARE);
            }
            ExprKind::Attribute { value, attr, .. } if is_self(value) => {
                self.add(attr, Namespace::ATTR);
            }
            _ => {}
        }
        walk_expr(self, expr);
    }

    fn visit_parameter(&mut self, param: &'ast Parameter) {
        self.add(&param.name, Namespace::BARE);
        walk_parameter(self, param);
    }

    fn visit_except_handler(&mut self, handler: &'ast ExceptHandler) {
        if let Some(name) = &handler.name {
            self.add(name, Namespace::BARE);
        }
        walk_except_handler(self, handler);
    }

    fn visit_pattern(&mut self, pattern: &'ast Pattern) {
        match &pattern.kind {
            PatternKind::Star(Some(name))
            | PatternKind::As {
                name: Some(name), ..
            }
            | PatternKind::Mapping {
                rest: Some(name), ..
            } => self.add(name, Namespace::BARE),
            _ => {}
        }
        walk_pattern(self, pattern);
    }
}

struct Functions<'a> {
    facts: &'a ProgramFacts,
    out: &'a mut Collected,
}

impl<'ast> Visitor<'ast> for Functions<'_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if let StmtKind::FunctionDef(def) = &stmt.kind {
            if !def.name.starts_with("__") && renamable(&def.name, self.facts) {
                self.out.ident(&def.name, Namespace::all());
            }
        }
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let ExprKind::Call { func, .. } = &expr.kind {
            match &func.kind {
                ExprKind::Name { id, .. }
                    if self.facts.bound.contains(id) && renamable(id, self.facts) =>
                {
                    self.out.ident(id, Namespace::BARE);
                }
                ExprKind::Attribute { attr, .. }
                    if self.facts.defined_attrs.contains(attr) && renamable(attr, self.facts) =>
                {
                    self.out.ident(attr, Namespace::ATTR);
                }
                _ => {}
            }
        }
        walk_expr(self, expr);
    }
}

struct Classes<'a> {
    facts: &'a ProgramFacts,
    out: &'a mut Collected,
}

impl<'ast> Visitor<'ast> for Classes<'_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if let StmtKind::ClassDef(def) = &stmt.kind {
            if renamable(&def.name, self.facts) {
                self.out.ident(&def.name, Namespace::all());
            }
        }
        walk_stmt(self, stmt);
    }
}

struct Numbers<'a> {
    out: &'a mut Collected,
}

impl<'ast> Visitor<'ast> for Numbers<'_> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        match &expr.kind {
            ExprKind::Constant(Constant::Int(value)) => {
                self.out.values.insert(Token::Int(value.clone()));
            }
            ExprKind::Constant(Constant::Float(value)) => {
                self.out.values.insert(Token::Float(FloatKey(*value)));
            }
            _ => {}
        }
        walk_expr(self, expr);
    }
}

struct Strings<'a> {
    out: &'a mut Collected,
}

impl Strings<'_> {
    fn add(&mut self, value: &str) {
        for c in value.chars().filter(|&c| c != ' ') {
            self.out.values.insert(Token::Codepoint(c));
        }
        self.out.values.insert(Token::Str(value.to_string()));
    }
}

impl<'ast> Visitor<'ast> for Strings<'_> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        match &expr.kind {
            ExprKind::Constant(Constant::Str(value)) => self.add(value),
            // Only top-level segments are rewritten; format-spec text stays.
            ExprKind::FString(parts) => {
                for part in parts {
                    if let FStringPart::Literal(text) = part {
                        self.add(text);
                    }
                }
            }
            _ => {}
        }
        walk_expr(self, expr);
    }
}
