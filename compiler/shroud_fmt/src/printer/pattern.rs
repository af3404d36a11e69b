//! Pattern Printing
//!
//! Sequences always print in brackets. An or-pattern or an as-pattern
//! nested where only a closed pattern may appear is parenthesized.

use shroud_ir::{MatchCase, Pattern, PatternKind};

use super::Printer;
use crate::emitter::Emitter;
use crate::precedence::Precedence;

impl<E: Emitter> Printer<E> {
    pub(super) fn match_case(&mut self, case: &MatchCase) {
        self.start_line();
        self.emit("case ");
        self.pattern(&case.pattern);
        if let Some(guard) = &case.guard {
            self.emit(" if ");
            self.expr(guard, Precedence::NamedExpr);
        }
        self.block(&case.body);
    }

    fn pattern(&mut self, pattern: &Pattern) {
        shroud_stack::ensure_sufficient_stack(|| match &pattern.kind {
            PatternKind::Value(value) => self.expr(value, Precedence::Arith),
            PatternKind::Sequence(items) => {
                self.emit("[");
                self.comma_separated(items, Self::pattern);
                self.emit("]");
            }
            PatternKind::Mapping {
                keys,
                patterns,
                rest,
            } => {
                self.emit("{");
                for (i, (key, value)) in keys.iter().zip(patterns).enumerate() {
                    if i > 0 {
                        self.emit(", ");
                    }
                    self.expr(key, Precedence::Arith);
                    self.emit(": ");
                    self.pattern(value);
                }
                if let Some(rest) = rest {
                    if !keys.is_empty() {
                        self.emit(", ");
                    }
                    self.emit("**");
                    self.emit(rest);
                }
                self.emit("}");
            }
            PatternKind::Class {
                cls,
                patterns,
                kwd_attrs,
                kwd_patterns,
            } => {
                self.expr(cls, Precedence::Atom);
                self.emit("(");
                self.comma_separated(patterns, Self::pattern);
                for (i, (attr, value)) in kwd_attrs.iter().zip(kwd_patterns).enumerate() {
                    if i > 0 || !patterns.is_empty() {
                        self.emit(", ");
                    }
                    self.emit(attr);
                    self.emit("=");
                    self.pattern(value);
                }
                self.emit(")");
            }
            PatternKind::Star(name) => {
                self.emit("*");
                self.emit(name.as_deref().unwrap_or("_"));
            }
            PatternKind::As { pattern, name } => {
                if let Some(inner) = pattern {
                    self.closed_pattern(inner, matches!(inner.kind, PatternKind::As { .. }));
                    self.emit(" as ");
                }
                self.emit(name.as_deref().unwrap_or("_"));
            }
            PatternKind::Or(alternatives) => {
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        self.emit(" | ");
                    }
                    let open = matches!(
                        alternative.kind,
                        PatternKind::Or(_) | PatternKind::As { pattern: Some(_), .. }
                    );
                    self.closed_pattern(alternative, open);
                }
            }
        });
    }

    fn closed_pattern(&mut self, pattern: &Pattern, parens: bool) {
        if parens {
            self.emit("(");
        }
        self.pattern(pattern);
        if parens {
            self.emit(")");
        }
    }
}
