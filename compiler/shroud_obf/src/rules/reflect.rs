//! Reflective indirection for module members and built-in functions.
//!
//! `os.getcwd` becomes `getattr(__import__("os"),"getcwd")` and `print(x)`
//! becomes `getattr(__import__("builtins"),"print")(x)`, with every string
//! spelled in escapes so neither name survives in the output.

use shroud_ir::builtins::is_builtin_function;
use shroud_ir::{Expr, ExprContext, ExprKind};

use crate::config::Categories;
use crate::dispatch::Rewriter;
use crate::encode::escape_literal;
use crate::lut::ModuleRef;

/// Expression text that loads `module` at run time.
pub(crate) fn import_text(module: &ModuleRef) -> String {
    if module.needs_import_module() {
        format!(
            "__import__({}).import_module({})",
            escape_literal("importlib"),
            escape_literal(&module.path)
        )
    } else {
        format!("__import__({})", escape_literal(&module.path))
    }
}

/// `getattr(<owner>,"<attr>")`
pub(crate) fn getattr_text(owner: &str, attr: &str) -> String {
    format!("getattr({owner},{})", escape_literal(attr))
}

impl Rewriter<'_> {
    /// Replace a load of `binding.attr` when `binding` is a removable
    /// module import. Never inside f-string slots.
    pub(crate) fn module_attribute(&self, expr: &mut Expr) -> bool {
        if !self.enabled(Categories::MODULES) || self.in_slot() {
            return false;
        }
        let ExprKind::Attribute {
            value,
            attr,
            ctx: ExprContext::Load,
        } = &expr.kind
        else {
            return false;
        };
        let Some(module) = value.as_name().and_then(|owner| self.modules.get(owner)) else {
            return false;
        };
        let text = getattr_text(&import_text(module), attr);
        tracing::trace!(module = %module.path, %attr, "module attribute");
        *expr = Expr::new(ExprKind::Raw(text), expr.span);
        true
    }

    /// Route a call to an unshadowed built-in function through the
    /// `builtins` module.
    pub(crate) fn builtin_call(&self, func: &mut Expr) -> bool {
        if self.in_slot() {
            return false;
        }
        let Some(name) = func.as_name() else {
            return false;
        };
        if !is_builtin_function(name) || self.facts.bound.contains(name) {
            return false;
        }
        let owner = format!("__import__({})", escape_literal("builtins"));
        let text = getattr_text(&owner, name);
        tracing::trace!(%name, "built-in call");
        *func = Expr::new(ExprKind::Raw(text), func.span);
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn import_spellings() {
        let plain = ModuleRef {
            path: "os".into(),
            aliased: false,
        };
        assert_eq!(import_text(&plain), r#"__import__("\x6f\x73")"#);

        let leaf = ModuleRef {
            path: "a.b".into(),
            aliased: true,
        };
        assert_eq!(
            import_text(&leaf),
            r#"__import__("\x69\x6d\x70\x6f\x72\x74\x6c\x69\x62").import_module("\x61\x2e\x62")"#
        );
    }

    #[test]
    fn getattr_spelling() {
        assert_eq!(getattr_text("m", "f"), r#"getattr(m,"\x66")"#);
    }
}
