//! Whole-module imports eligible for reflective access.
//!
//! A binding qualifies when it is used at least once and every use of it is
//! the owner of a load-context attribute access outside any f-string. Only
//! then can the `import` go away and each `m.attr` become a `getattr` over
//! an `__import__` call. Imports kept for their side effects have no uses
//! and stay.

use rustc_hash::{FxHashMap, FxHashSet};
use shroud_ir::visitor::{
    walk_except_handler, walk_expr, walk_parameter, walk_pattern, walk_stmt, Visitor,
};
use shroud_ir::{
    ExceptHandler, Expr, ExprContext, ExprKind, Module, Parameter, Pattern, PatternKind, Stmt,
    StmtKind,
};

/// Where a module binding points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleRef {
    /// Fully qualified dotted path as written in the import.
    pub path: String,
    /// `import a.b as m` binds `a.b` itself; `import a.b` binds `a`.
    pub aliased: bool,
}

impl ModuleRef {
    /// `__import__` returns the top-level package, which is what an
    /// unaliased import binds; an aliased dotted import needs the leaf.
    pub fn needs_import_module(&self) -> bool {
        self.aliased && self.path.contains('.')
    }
}

/// Local import binding to module path.
#[derive(Clone, Debug, Default)]
pub struct ModuleAliasTable {
    bindings: FxHashMap<String, ModuleRef>,
}

impl ModuleAliasTable {
    pub fn get(&self, binding: &str) -> Option<&ModuleRef> {
        self.bindings.get(binding)
    }

    pub fn contains(&self, binding: &str) -> bool {
        self.bindings.contains_key(binding)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Collect the first member of every whole-module import whose binding is
/// only ever used as an attribute owner.
#[tracing::instrument(level = "debug", skip_all)]
pub fn build_module_table(module: &Module) -> ModuleAliasTable {
    let mut candidates = Candidates::default();
    candidates.visit_module(module);

    let mut usage = Usage {
        candidates: &candidates.found,
        disqualified: candidates.conflicts,
        used: FxHashSet::default(),
        fstring_depth: 0,
    };
    usage.visit_module(module);

    let Usage {
        disqualified, used, ..
    } = usage;
    let bindings: FxHashMap<String, ModuleRef> = candidates
        .found
        .into_iter()
        .filter(|(binding, _)| used.contains(binding) && !disqualified.contains(binding))
        .collect();
    tracing::debug!(modules = bindings.len(), "module table built");
    ModuleAliasTable { bindings }
}

#[derive(Default)]
struct Candidates {
    found: FxHashMap<String, ModuleRef>,
    conflicts: FxHashSet<String>,
}

impl<'ast> Visitor<'ast> for Candidates {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if let StmtKind::Import(names) = &stmt.kind {
            if let Some(first) = names.first() {
                let binding = first.binding().to_string();
                let module = ModuleRef {
                    path: first.name.clone(),
                    aliased: first.asname.is_some(),
                };
                match self.found.get(&binding) {
                    Some(existing) if *existing != module => {
                        self.conflicts.insert(binding);
                    }
                    Some(_) => {}
                    None => {
                        self.found.insert(binding, module);
                    }
                }
            }
        }
        walk_stmt(self, stmt);
    }
}

/// Finds candidate bindings used in any way other than `binding.attr`.
struct Usage<'a> {
    candidates: &'a FxHashMap<String, ModuleRef>,
    disqualified: FxHashSet<String>,
    used: FxHashSet<String>,
    fstring_depth: usize,
}

impl Usage<'_> {
    fn disqualify(&mut self, name: &str) {
        if self.candidates.contains_key(name) {
            self.disqualified.insert(name.to_string());
        }
    }
}

impl<'ast> Visitor<'ast> for Usage<'_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match &stmt.kind {
            StmtKind::FunctionDef(def) => self.disqualify(&def.name),
            StmtKind::ClassDef(def) => self.disqualify(&def.name),
            StmtKind::Global(names) | StmtKind::Nonlocal(names) => {
                for name in names {
                    self.disqualify(name);
                }
            }
            StmtKind::ImportFrom { names, .. } => {
                for alias in names {
                    self.disqualify(alias.binding());
                }
            }
            StmtKind::Import(names) => {
                for alias in names {
                    let binding = alias.binding();
                    let same = self.candidates.get(binding).is_some_and(|module| {
                        module.path == alias.name && module.aliased == alias.asname.is_some()
                    });
                    if !same {
                        self.disqualify(binding);
                    }
                }
            }
            _ => {}
        }
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        match &expr.kind {
            ExprKind::Attribute {
                value,
                ctx: ExprContext::Load,
                ..
            } if self.fstring_depth == 0 => match value.as_name() {
                Some(owner) => {
                    if self.candidates.contains_key(owner) {
                        self.used.insert(owner.to_string());
                    }
                }
                None => walk_expr(self, expr),
            },
            ExprKind::Name { id, .. } => self.disqualify(id),
            ExprKind::FString(_) => {
                self.fstring_depth += 1;
                walk_expr(self, expr);
                self.fstring_depth -= 1;
            }
            _ => walk_expr(self, expr),
        }
    }

    fn visit_parameter(&mut self, param: &'ast Parameter) {
        self.disqualify(&param.name);
        walk_parameter(self, param);
    }

    fn visit_except_handler(&mut self, handler: &'ast ExceptHandler) {
        if let Some(name) = &handler.name {
            self.disqualify(name);
        }
        walk_except_handler(self, handler);
    }

    /// A dotted name in a pattern must stay a dotted name, so its module
    /// keeps its import.
    fn visit_pattern(&mut self, pattern: &'ast Pattern) {
        match &pattern.kind {
            PatternKind::Value(value) | PatternKind::Class { cls: value, .. } => {
                if let Some(root) = dotted_root(value) {
                    self.disqualify(root);
                }
            }
            PatternKind::Mapping { keys, rest, .. } => {
                for root in keys.iter().filter_map(dotted_root) {
                    self.disqualify(root);
                }
                if let Some(rest) = rest {
                    self.disqualify(rest);
                }
            }
            PatternKind::Star(Some(name))
            | PatternKind::As {
                name: Some(name), ..
            } => self.disqualify(name),
            _ => {}
        }
        walk_pattern(self, pattern);
    }
}

/// `a` for `a.b.c`.
fn dotted_root(expr: &Expr) -> Option<&str> {
    match &expr.kind {
        ExprKind::Name { id, .. } => Some(id),
        ExprKind::Attribute { value, .. } => dotted_root(value),
        _ => None,
    }
}
