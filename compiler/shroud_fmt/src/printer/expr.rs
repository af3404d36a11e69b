//! Expression Printing
//!
//! `expr(e, context)` wraps `e` in parentheses when it binds more loosely
//! than `context` requires.

use shroud_ir::{
    Arguments, Comprehension, Constant, Expr, ExprKind, Keyword, Parameter,
};
use shroud_stack::ensure_sufficient_stack;

use super::Printer;
use crate::emitter::Emitter;
use crate::precedence::Precedence;

impl<E: Emitter> Printer<E> {
    /// Print `expr` where a binding of at least `context` is required.
    pub fn expr(&mut self, expr: &Expr, context: Precedence) {
        ensure_sufficient_stack(|| {
            let parens = Precedence::of(expr) < context;
            if parens {
                self.emit("(");
            }
            self.expr_kind(expr);
            if parens {
                self.emit(")");
            }
        });
    }

    fn expr_kind(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::BoolOp { op, values } => {
                let inner = Precedence::of_bool(*op).next();
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        self.emit(" ");
                        self.emit(op.as_symbol());
                        self.emit(" ");
                    }
                    self.expr(value, inner);
                }
            }
            ExprKind::NamedExpr { target, value } => {
                self.expr(target, Precedence::Atom);
                self.emit(" := ");
                self.expr(value, Precedence::Test);
            }
            ExprKind::BinOp { left, op, right } => {
                let level = Precedence::of_binary(*op);
                let (left_level, right_level) = if level == Precedence::Power {
                    (level.next(), level)
                } else {
                    (level, level.next())
                };
                self.expr(left, left_level);
                self.emit(" ");
                self.emit(op.as_symbol());
                self.emit(" ");
                self.expr(right, right_level);
            }
            ExprKind::UnaryOp { op, operand } => {
                self.emit(op.as_symbol());
                self.expr(operand, Precedence::of_unary(*op));
            }
            ExprKind::Lambda { args, body } => {
                self.emit("lambda");
                if !args.is_empty() {
                    self.emit(" ");
                    self.arguments(args, false);
                }
                self.emit(": ");
                self.expr(body, Precedence::Test);
            }
            ExprKind::IfExp { test, body, orelse } => {
                self.expr(body, Precedence::Test.next());
                self.emit(" if ");
                self.expr(test, Precedence::Test.next());
                self.emit(" else ");
                self.expr(orelse, Precedence::Test);
            }
            ExprKind::Dict { keys, values } => {
                self.emit("{");
                for (i, (key, value)) in keys.iter().zip(values).enumerate() {
                    if i > 0 {
                        self.emit(", ");
                    }
                    match key {
                        Some(key) => {
                            self.expr(key, Precedence::Test);
                            self.emit(": ");
                            self.expr(value, Precedence::Test);
                        }
                        None => {
                            self.emit("**");
                            self.expr(value, Precedence::BitOr);
                        }
                    }
                }
                self.emit("}");
            }
            ExprKind::Set(elts) => {
                if elts.is_empty() {
                    self.emit("{*()}");
                } else {
                    self.emit("{");
                    self.elements(elts);
                    self.emit("}");
                }
            }
            ExprKind::ListComp { elt, generators } => {
                self.emit("[");
                self.expr(elt, Precedence::Test);
                self.comprehensions(generators);
                self.emit("]");
            }
            ExprKind::SetComp { elt, generators } => {
                self.emit("{");
                self.expr(elt, Precedence::Test);
                self.comprehensions(generators);
                self.emit("}");
            }
            ExprKind::DictComp {
                key,
                value,
                generators,
            } => {
                self.emit("{");
                self.expr(key, Precedence::Test);
                self.emit(": ");
                self.expr(value, Precedence::Test);
                self.comprehensions(generators);
                self.emit("}");
            }
            ExprKind::GeneratorExp { elt, generators } => {
                self.emit("(");
                self.expr(elt, Precedence::Test);
                self.comprehensions(generators);
                self.emit(")");
            }
            ExprKind::Await(value) => {
                self.emit("await ");
                self.expr(value, Precedence::Atom);
            }
            ExprKind::Yield(value) => {
                self.emit("yield");
                if let Some(value) = value {
                    self.emit(" ");
                    self.expr(value, Precedence::Yield);
                }
            }
            ExprKind::YieldFrom(value) => {
                self.emit("yield from ");
                self.expr(value, Precedence::Test);
            }
            ExprKind::Compare {
                left,
                ops,
                comparators,
            } => {
                self.expr(left, Precedence::Cmp.next());
                for (op, right) in ops.iter().zip(comparators) {
                    self.emit(" ");
                    self.emit(op.as_symbol());
                    self.emit(" ");
                    self.expr(right, Precedence::Cmp.next());
                }
            }
            ExprKind::Call {
                func,
                args,
                keywords,
            } => {
                self.expr(func, Precedence::Atom);
                self.emit("(");
                self.comma_separated(args, |p, arg| p.expr(arg, Precedence::Test));
                if !args.is_empty() && !keywords.is_empty() {
                    self.emit(", ");
                }
                self.comma_separated(keywords, Self::keyword);
                self.emit(")");
            }
            ExprKind::FString(parts) => self.fstring(parts),
            ExprKind::Constant(constant) => self.constant(constant),
            ExprKind::Attribute { value, attr, .. } => {
                self.expr(value, Precedence::Atom);
                // `1.real` would lex as a float
                if matches!(value.kind, ExprKind::Constant(Constant::Int(_))) {
                    self.emit(" ");
                }
                self.emit(".");
                self.emit(attr);
            }
            ExprKind::Subscript { value, slice, .. } => {
                self.expr(value, Precedence::Atom);
                self.emit("[");
                match &slice.kind {
                    ExprKind::Tuple { elts, .. } if !elts.is_empty() => {
                        self.comma_separated(elts, |p, elt| p.expr(elt, Precedence::Test));
                        if elts.len() == 1 {
                            self.emit(",");
                        }
                    }
                    _ => self.expr(slice, Precedence::Tuple),
                }
                self.emit("]");
            }
            ExprKind::Starred { value, .. } => {
                self.emit("*");
                self.expr(value, Precedence::BitOr);
            }
            ExprKind::Name { id, .. } => self.emit(id),
            ExprKind::List { elts, .. } => {
                self.emit("[");
                self.elements(elts);
                self.emit("]");
            }
            ExprKind::Tuple { elts, .. } => {
                self.emit("(");
                self.elements(elts);
                if elts.len() == 1 {
                    self.emit(",");
                }
                self.emit(")");
            }
            ExprKind::Slice { lower, upper, step } => {
                if let Some(lower) = lower {
                    self.expr(lower, Precedence::Test);
                }
                self.emit(":");
                if let Some(upper) = upper {
                    self.expr(upper, Precedence::Test);
                }
                if let Some(step) = step {
                    self.emit(":");
                    self.expr(step, Precedence::Test);
                }
            }
            ExprKind::Raw(text) => self.emit(text),
        }
    }

    fn elements(&mut self, elts: &[Expr]) {
        self.comma_separated(elts, |p, elt| p.expr(elt, Precedence::Test));
    }

    fn comprehensions(&mut self, generators: &[Comprehension]) {
        for comp in generators {
            self.emit(if comp.is_async { " async for " } else { " for " });
            self.expr(&comp.target, Precedence::Tuple);
            self.emit(" in ");
            self.expr(&comp.iter, Precedence::Test.next());
            for cond in &comp.ifs {
                self.emit(" if ");
                self.expr(cond, Precedence::Test.next());
            }
        }
    }

    fn keyword(&mut self, keyword: &Keyword) {
        match &keyword.arg {
            Some(arg) => {
                self.emit(arg);
                self.emit("=");
                self.expr(&keyword.value, Precedence::Test);
            }
            None => {
                self.emit("**");
                self.expr(&keyword.value, Precedence::BitOr);
            }
        }
    }

    /// Parameter list without the surrounding brackets. Lambdas have no
    /// annotations.
    pub(super) fn arguments(&mut self, args: &Arguments, annotations: bool) {
        let mut first = true;
        let mut sep = |p: &mut Self| {
            if !first {
                p.emit(", ");
            }
            first = false;
        };

        for param in &args.posonlyargs {
            sep(self);
            self.parameter(param, annotations);
        }
        if !args.posonlyargs.is_empty() {
            sep(self);
            self.emit("/");
        }
        for param in &args.args {
            sep(self);
            self.parameter(param, annotations);
        }
        if let Some(vararg) = &args.vararg {
            sep(self);
            self.emit("*");
            self.parameter(vararg, annotations);
        } else if !args.kwonlyargs.is_empty() {
            sep(self);
            self.emit("*");
        }
        for param in &args.kwonlyargs {
            sep(self);
            self.parameter(param, annotations);
        }
        if let Some(kwarg) = &args.kwarg {
            sep(self);
            self.emit("**");
            self.parameter(kwarg, annotations);
        }
    }

    fn parameter(&mut self, param: &Parameter, annotations: bool) {
        self.emit(&param.name);
        let annotation = param.annotation.as_ref().filter(|_| annotations);
        if let Some(annotation) = annotation {
            self.emit(": ");
            self.expr(annotation, Precedence::Test);
        }
        if let Some(default) = &param.default {
            self.emit(if annotation.is_some() { " = " } else { "=" });
            self.expr(default, Precedence::Test);
        }
    }
}
