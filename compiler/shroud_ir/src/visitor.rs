//! Read-only syntax tree traversal.
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! visits children in source order. Override a `visit_*` method to observe a
//! node and call `walk_*` from it to keep descending.
//!
//! # Example
//!
//! ```
//! use shroud_ir::visitor::{walk_expr, Visitor};
//! use shroud_ir::{Constant, Expr, ExprKind};
//!
//! struct CountStrings {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountStrings {
//!     fn visit_expr(&mut self, expr: &'ast Expr) {
//!         if let ExprKind::Constant(Constant::Str(_)) = &expr.kind {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use crate::ast::{
    Alias, Arguments, Comprehension, ExceptHandler, Expr, ExprKind, FStringPart, Keyword,
    MatchCase, Module, Parameter, Pattern, PatternKind, Stmt, StmtKind,
};

/// Syntax tree visitor.
///
/// The visitor can mutate its own state; the tree itself stays immutable.
pub trait Visitor<'ast> {
    fn visit_module(&mut self, module: &'ast Module) {
        walk_module(self, module);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    fn visit_arguments(&mut self, args: &'ast Arguments) {
        walk_arguments(self, args);
    }

    fn visit_parameter(&mut self, param: &'ast Parameter) {
        walk_parameter(self, param);
    }

    fn visit_keyword(&mut self, keyword: &'ast Keyword) {
        self.visit_expr(&keyword.value);
    }

    fn visit_comprehension(&mut self, comp: &'ast Comprehension) {
        walk_comprehension(self, comp);
    }

    fn visit_except_handler(&mut self, handler: &'ast ExceptHandler) {
        walk_except_handler(self, handler);
    }

    /// Import aliases have no child expressions.
    fn visit_alias(&mut self, alias: &'ast Alias) {
        let _ = alias;
    }

    fn visit_fstring_part(&mut self, part: &'ast FStringPart) {
        walk_fstring_part(self, part);
    }

    fn visit_match_case(&mut self, case: &'ast MatchCase) {
        walk_match_case(self, case);
    }

    /// Value expressions inside a pattern (literals, dotted names, mapping
    /// keys, class references) are passed to `visit_expr`.
    fn visit_pattern(&mut self, pattern: &'ast Pattern) {
        walk_pattern(self, pattern);
    }
}

pub fn walk_module<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, module: &'ast Module) {
    walk_body(visitor, &module.body);
}

pub fn walk_body<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, body: &'ast [Stmt]) {
    for stmt in body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    match &stmt.kind {
        StmtKind::FunctionDef(def) => {
            for decorator in &def.decorators {
                visitor.visit_expr(decorator);
            }
            visitor.visit_arguments(&def.args);
            if let Some(returns) = &def.returns {
                visitor.visit_expr(returns);
            }
            walk_body(visitor, &def.body);
        }
        StmtKind::ClassDef(def) => {
            for decorator in &def.decorators {
                visitor.visit_expr(decorator);
            }
            for base in &def.bases {
                visitor.visit_expr(base);
            }
            for keyword in &def.keywords {
                visitor.visit_keyword(keyword);
            }
            walk_body(visitor, &def.body);
        }
        StmtKind::Return(value) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        StmtKind::Delete(targets) => {
            for target in targets {
                visitor.visit_expr(target);
            }
        }
        StmtKind::Assign { targets, value } => {
            for target in targets {
                visitor.visit_expr(target);
            }
            visitor.visit_expr(value);
        }
        StmtKind::AugAssign { target, value, .. } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        StmtKind::AnnAssign {
            target,
            annotation,
            value,
            ..
        } => {
            visitor.visit_expr(target);
            visitor.visit_expr(annotation);
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        StmtKind::For {
            target,
            iter,
            body,
            orelse,
            ..
        } => {
            visitor.visit_expr(target);
            visitor.visit_expr(iter);
            walk_body(visitor, body);
            walk_body(visitor, orelse);
        }
        StmtKind::While { test, body, orelse } | StmtKind::If { test, body, orelse } => {
            visitor.visit_expr(test);
            walk_body(visitor, body);
            walk_body(visitor, orelse);
        }
        StmtKind::With { items, body, .. } => {
            for item in items {
                visitor.visit_expr(&item.context_expr);
                if let Some(vars) = &item.optional_vars {
                    visitor.visit_expr(vars);
                }
            }
            walk_body(visitor, body);
        }
        StmtKind::Raise { exc, cause } => {
            if let Some(exc) = exc {
                visitor.visit_expr(exc);
            }
            if let Some(cause) = cause {
                visitor.visit_expr(cause);
            }
        }
        StmtKind::Try {
            body,
            handlers,
            orelse,
            finalbody,
            ..
        } => {
            walk_body(visitor, body);
            for handler in handlers {
                visitor.visit_except_handler(handler);
            }
            walk_body(visitor, orelse);
            walk_body(visitor, finalbody);
        }
        StmtKind::Assert { test, msg } => {
            visitor.visit_expr(test);
            if let Some(msg) = msg {
                visitor.visit_expr(msg);
            }
        }
        StmtKind::Import(names) | StmtKind::ImportFrom { names, .. } => {
            for alias in names {
                visitor.visit_alias(alias);
            }
        }
        StmtKind::Match { subject, cases } => {
            visitor.visit_expr(subject);
            for case in cases {
                visitor.visit_match_case(case);
            }
        }
        StmtKind::TypeAlias { name, value } => {
            visitor.visit_expr(name);
            visitor.visit_expr(value);
        }
        StmtKind::Expr(expr) => visitor.visit_expr(expr),
        StmtKind::Global(_)
        | StmtKind::Nonlocal(_)
        | StmtKind::Pass
        | StmtKind::Break
        | StmtKind::Continue => {}
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::BoolOp { values, .. } => walk_exprs(visitor, values),
        ExprKind::NamedExpr { target, value } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        ExprKind::BinOp { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::UnaryOp { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Lambda { args, body } => {
            visitor.visit_arguments(args);
            visitor.visit_expr(body);
        }
        ExprKind::IfExp { test, body, orelse } => {
            visitor.visit_expr(body);
            visitor.visit_expr(test);
            visitor.visit_expr(orelse);
        }
        ExprKind::Dict { keys, values } => {
            for (key, value) in keys.iter().zip(values) {
                if let Some(key) = key {
                    visitor.visit_expr(key);
                }
                visitor.visit_expr(value);
            }
        }
        ExprKind::Set(elts) => walk_exprs(visitor, elts),
        ExprKind::ListComp { elt, generators }
        | ExprKind::SetComp { elt, generators }
        | ExprKind::GeneratorExp { elt, generators } => {
            for comp in generators {
                visitor.visit_comprehension(comp);
            }
            visitor.visit_expr(elt);
        }
        ExprKind::DictComp {
            key,
            value,
            generators,
        } => {
            for comp in generators {
                visitor.visit_comprehension(comp);
            }
            visitor.visit_expr(key);
            visitor.visit_expr(value);
        }
        ExprKind::Await(value) | ExprKind::YieldFrom(value) => visitor.visit_expr(value),
        ExprKind::Yield(value) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        ExprKind::Compare {
            left, comparators, ..
        } => {
            visitor.visit_expr(left);
            walk_exprs(visitor, comparators);
        }
        ExprKind::Call {
            func,
            args,
            keywords,
        } => {
            visitor.visit_expr(func);
            walk_exprs(visitor, args);
            for keyword in keywords {
                visitor.visit_keyword(keyword);
            }
        }
        ExprKind::FString(parts) => {
            for part in parts {
                visitor.visit_fstring_part(part);
            }
        }
        ExprKind::Attribute { value, .. } | ExprKind::Starred { value, .. } => {
            visitor.visit_expr(value);
        }
        ExprKind::Subscript { value, slice, .. } => {
            visitor.visit_expr(value);
            visitor.visit_expr(slice);
        }
        ExprKind::List { elts, .. } | ExprKind::Tuple { elts, .. } => walk_exprs(visitor, elts),
        ExprKind::Slice { lower, upper, step } => {
            for bound in [lower, upper, step].into_iter().flatten() {
                visitor.visit_expr(bound);
            }
        }
        ExprKind::Constant(_) | ExprKind::Name { .. } | ExprKind::Raw(_) => {}
    }
}

fn walk_exprs<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, exprs: &'ast [Expr]) {
    for expr in exprs {
        visitor.visit_expr(expr);
    }
}

pub fn walk_arguments<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, args: &'ast Arguments) {
    for param in args.iter() {
        visitor.visit_parameter(param);
    }
}

pub fn walk_parameter<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, param: &'ast Parameter) {
    if let Some(annotation) = &param.annotation {
        visitor.visit_expr(annotation);
    }
    if let Some(default) = &param.default {
        visitor.visit_expr(default);
    }
}

pub fn walk_comprehension<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    comp: &'ast Comprehension,
) {
    visitor.visit_expr(&comp.target);
    visitor.visit_expr(&comp.iter);
    walk_exprs(visitor, &comp.ifs);
}

pub fn walk_except_handler<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    handler: &'ast ExceptHandler,
) {
    if let Some(type_) = &handler.type_ {
        visitor.visit_expr(type_);
    }
    walk_body(visitor, &handler.body);
}

pub fn walk_fstring_part<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    part: &'ast FStringPart,
) {
    if let FStringPart::Slot(slot) = part {
        visitor.visit_expr(&slot.value);
        for spec in &slot.format_spec {
            visitor.visit_fstring_part(spec);
        }
    }
}

pub fn walk_match_case<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, case: &'ast MatchCase) {
    visitor.visit_pattern(&case.pattern);
    if let Some(guard) = &case.guard {
        visitor.visit_expr(guard);
    }
    walk_body(visitor, &case.body);
}

pub fn walk_pattern<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, pattern: &'ast Pattern) {
    match &pattern.kind {
        PatternKind::Value(value) => visitor.visit_expr(value),
        PatternKind::Sequence(patterns) | PatternKind::Or(patterns) => {
            for pattern in patterns {
                visitor.visit_pattern(pattern);
            }
        }
        PatternKind::Mapping { keys, patterns, .. } => {
            for (key, pattern) in keys.iter().zip(patterns) {
                visitor.visit_expr(key);
                visitor.visit_pattern(pattern);
            }
        }
        PatternKind::Class {
            cls,
            patterns,
            kwd_patterns,
            ..
        } => {
            visitor.visit_expr(cls);
            for pattern in patterns.iter().chain(kwd_patterns) {
                visitor.visit_pattern(pattern);
            }
        }
        PatternKind::As { pattern, .. } => {
            if let Some(pattern) = pattern {
                visitor.visit_pattern(pattern);
            }
        }
        PatternKind::Star(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Constant, ExprContext, Span};

    struct CollectNames(Vec<String>);

    impl<'ast> Visitor<'ast> for CollectNames {
        fn visit_expr(&mut self, expr: &'ast Expr) {
            if let ExprKind::Name { id, .. } = &expr.kind {
                self.0.push(id.clone());
            }
            walk_expr(self, expr);
        }
    }

    fn name(id: &str) -> Expr {
        Expr::new(
            ExprKind::Name {
                id: id.into(),
                ctx: ExprContext::Load,
            },
            Span::DUMMY,
        )
    }

    #[test]
    fn visits_call_children_in_order() {
        let call = Expr::new(
            ExprKind::Call {
                func: Box::new(name("f")),
                args: vec![name("a")],
                keywords: vec![Keyword {
                    arg: Some("k".into()),
                    value: name("b"),
                    span: Span::DUMMY,
                }],
            },
            Span::DUMMY,
        );
        let module = Module {
            body: vec![
                Stmt::new(StmtKind::Expr(call), Span::DUMMY),
                Stmt::new(
                    StmtKind::Return(Some(Expr::new(
                        ExprKind::Constant(Constant::None),
                        Span::DUMMY,
                    ))),
                    Span::DUMMY,
                ),
            ],
        };
        let mut collect = CollectNames(Vec::new());
        collect.visit_module(&module);
        assert_eq!(collect.0, ["f", "a", "b"]);
    }

    #[test]
    fn visits_pattern_values_and_guards() {
        let case = MatchCase {
            pattern: Pattern::new(
                PatternKind::Class {
                    cls: name("Point"),
                    patterns: vec![Pattern::new(PatternKind::Value(name("ORIGIN")), Span::DUMMY)],
                    kwd_attrs: vec!["y".into()],
                    kwd_patterns: vec![Pattern::new(
                        PatternKind::As {
                            pattern: None,
                            name: Some("y".into()),
                        },
                        Span::DUMMY,
                    )],
                },
                Span::DUMMY,
            ),
            guard: Some(name("ok")),
            body: Vec::new(),
        };
        let module = Module {
            body: vec![Stmt::new(
                StmtKind::Match {
                    subject: name("p"),
                    cases: vec![case],
                },
                Span::DUMMY,
            )],
        };
        let mut collect = CollectNames(Vec::new());
        collect.visit_module(&module);
        assert_eq!(collect.0, ["p", "Point", "ORIGIN", "ok"]);
    }

    #[test]
    fn descends_into_fstring_slots() {
        let fstring = Expr::new(
            ExprKind::FString(vec![
                FStringPart::Literal("x = ".into()),
                FStringPart::Slot(crate::InterpolationSlot {
                    value: Box::new(name("x")),
                    conversion: None,
                    format_spec: Vec::new(),
                }),
            ]),
            Span::DUMMY,
        );
        let mut collect = CollectNames(Vec::new());
        collect.visit_expr(&fstring);
        assert_eq!(collect.0, ["x"]);
    }
}
