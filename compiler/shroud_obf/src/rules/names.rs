//! Identifier rules: bare names, definition sites, attribute names and
//! call targets.

use shroud_ir::builtins::is_builtin;
use shroud_ir::{Expr, ExprKind};

use super::CallContext;
use crate::config::Categories;
use crate::dispatch::Rewriter;
use crate::lut::Namespace;

impl Rewriter<'_> {
    /// Swap `name` for its alias in `ns`; reports whether it changed.
    pub(crate) fn rename_in(&self, name: &mut String, ns: Namespace) -> bool {
        match self.table.ident(name, ns) {
            Some(alias) => {
                tracing::trace!(%name, %alias, "rename");
                *name = alias.to_string();
                true
            }
            None => false,
        }
    }

    pub(crate) fn rename_bare(&self, name: &mut String) -> bool {
        self.rename_in(name, Namespace::BARE)
    }

    pub(crate) fn rename_function(&self, name: &mut String) {
        self.rename_in(name, Namespace::all());
    }

    pub(crate) fn rename_class(&self, name: &mut String) {
        self.rename_in(name, Namespace::all());
    }

    pub(crate) fn rename_parameter(&self, name: &mut String) {
        if name != "self" {
            self.rename_bare(name);
        }
    }

    /// `global` and `nonlocal` declarations name the same bindings as the
    /// bare names they govern.
    pub(crate) fn rename_declared(&self, names: &mut [String]) {
        for name in names {
            self.rename_bare(name);
        }
    }

    pub(crate) fn name(&self, expr: &mut Expr) {
        if let ExprKind::Name { id, .. } = &mut expr.kind {
            self.rename_bare(id);
        }
    }

    /// Module attributes become reflective; any other attribute name is
    /// aliased, including `self.x`.
    pub(crate) fn attribute(&self, expr: &mut Expr) {
        if self.module_attribute(expr) {
            return;
        }
        if let ExprKind::Attribute { attr, .. } = &mut expr.kind {
            self.rename_in(attr, Namespace::ATTR);
        }
    }

    /// Whether keyword names of a call to `func` follow the callee's
    /// renamed parameters.
    pub(crate) fn call_context(&self, func: &Expr) -> CallContext {
        let user = match &func.kind {
            ExprKind::Name { id, .. } => {
                self.facts.local_callables.contains(id.as_str()) && !is_builtin(id)
            }
            ExprKind::Attribute { value, attr, .. } => {
                let module_owner = value.as_name().is_some_and(|owner| {
                    self.modules.contains(owner) || self.facts.module_imports.contains(owner)
                });
                !module_owner && self.facts.definitions.contains(attr.as_str())
            }
            _ => false,
        };
        if user {
            CallContext::UserCall
        } else {
            CallContext::ExternalCall
        }
    }

    /// Keyword names first, while the target still has its original name,
    /// then the target itself.
    pub(crate) fn call(&self, expr: &mut Expr) {
        let ExprKind::Call { func, keywords, .. } = &mut expr.kind else {
            return;
        };
        let context = self.call_context(func);
        if context == CallContext::UserCall {
            for keyword in keywords.iter_mut() {
                if let Some(arg) = &mut keyword.arg {
                    self.rename_bare(arg);
                }
            }
        }
        if self.enabled(Categories::FUNCTIONS) && self.builtin_call(func) {
            return;
        }
        if let ExprKind::Name { id, .. } = &mut func.kind {
            self.rename_bare(id);
        }
    }
}
