//! `case` patterns.
//!
//! A pattern only admits literals and dotted names where other code would
//! take an expression, so aliases and reflective calls never apply here.
//! Capture names are bindings and follow the bare-name table.

use shroud_ir::{Constant, Expr, ExprKind, Pattern, PatternKind};

use crate::config::{Categories, StringMode};
use crate::dispatch::Rewriter;
use crate::encode::escape_literal;
use crate::lut::Namespace;

impl Rewriter<'_> {
    pub(crate) fn pattern(&mut self, pattern: &mut Pattern) {
        shroud_stack::ensure_sufficient_stack(|| match &mut pattern.kind {
            PatternKind::Value(value) => self.pattern_value(value),
            PatternKind::Sequence(items) | PatternKind::Or(items) => {
                for item in items {
                    self.pattern(item);
                }
            }
            PatternKind::Mapping {
                keys,
                patterns,
                rest,
            } => {
                for key in keys {
                    self.pattern_value(key);
                }
                for item in patterns {
                    self.pattern(item);
                }
                if let Some(rest) = rest {
                    self.rename_bare(rest);
                }
            }
            PatternKind::Class {
                cls,
                patterns,
                kwd_attrs,
                kwd_patterns,
            } => {
                self.pattern_value(cls);
                for item in patterns {
                    self.pattern(item);
                }
                for attr in kwd_attrs {
                    self.rename_in(attr, Namespace::ATTR);
                }
                for item in kwd_patterns {
                    self.pattern(item);
                }
            }
            PatternKind::Star(name) => {
                if let Some(name) = name {
                    self.rename_bare(name);
                }
            }
            PatternKind::As { pattern, name } => {
                if let Some(inner) = pattern {
                    self.pattern(inner);
                }
                if let Some(name) = name {
                    self.rename_bare(name);
                }
            }
        });
    }

    /// Dotted names are renamed part by part. Strings may be escaped in
    /// place, which still spells a literal.
    fn pattern_value(&mut self, expr: &mut Expr) {
        match &mut expr.kind {
            ExprKind::Name { id, .. } => {
                self.rename_bare(id);
            }
            ExprKind::Attribute { value, attr, .. } => {
                self.rename_in(attr, Namespace::ATTR);
                self.pattern_value(value);
            }
            ExprKind::Constant(Constant::Str(text))
                if self.enabled(Categories::STRINGS)
                    && self.encoder.mode() == StringMode::Direct =>
            {
                tracing::trace!(len = text.len(), "pattern string: escaped in place");
                let raw = escape_literal(text);
                *expr = Expr::new(ExprKind::Raw(raw), expr.span);
            }
            _ => {}
        }
    }
}
