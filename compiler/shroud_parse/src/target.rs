//! Assignment and deletion targets.
//!
//! Targets are parsed as ordinary expressions and then re-contexted here;
//! anything that cannot be bound is rejected.

use shroud_ir::{Constant, Expr, ExprContext, ExprKind};

use crate::{ParseError, ParseErrorKind};

/// Rewrite `expr` (and nested tuple/list elements) to `ctx`.
pub(crate) fn set_context(expr: &mut Expr, ctx: ExprContext) -> Result<(), ParseError> {
    let action = match ctx {
        ExprContext::Del => "delete",
        ExprContext::Load | ExprContext::Store => "assign to",
    };
    match &mut expr.kind {
        ExprKind::Name { ctx: slot, .. }
        | ExprKind::Attribute { ctx: slot, .. }
        | ExprKind::Subscript { ctx: slot, .. } => {
            *slot = ctx;
            Ok(())
        }
        ExprKind::Starred { value, ctx: slot } if ctx != ExprContext::Del => {
            *slot = ctx;
            set_context(value, ctx)
        }
        ExprKind::List { elts, ctx: slot } | ExprKind::Tuple { elts, ctx: slot } => {
            *slot = ctx;
            for elt in elts {
                set_context(elt, ctx)?;
            }
            Ok(())
        }
        kind => Err(ParseError::new(
            ParseErrorKind::InvalidTarget {
                action,
                target: describe(kind),
            },
            expr.span,
        )),
    }
}

fn describe(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::Call { .. } => "function call",
        ExprKind::Constant(Constant::None | Constant::Bool(_) | Constant::Ellipsis) => "constant",
        ExprKind::Constant(_) | ExprKind::FString(_) => "literal",
        ExprKind::Lambda { .. } => "lambda",
        ExprKind::NamedExpr { .. } => "named expression",
        ExprKind::Starred { .. } => "starred",
        ExprKind::Compare { .. } => "comparison",
        ExprKind::Await(_) => "await expression",
        ExprKind::Yield(_) | ExprKind::YieldFrom(_) => "yield expression",
        ExprKind::IfExp { .. } => "conditional expression",
        ExprKind::ListComp { .. }
        | ExprKind::SetComp { .. }
        | ExprKind::DictComp { .. }
        | ExprKind::GeneratorExp { .. } => "comprehension",
        ExprKind::Dict { .. } | ExprKind::Set(_) => "display",
        _ => "expression",
    }
}
