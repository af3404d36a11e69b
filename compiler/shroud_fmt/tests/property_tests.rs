//! Property-based tests for expression parenthesization.
//!
//! Random operator trees are printed, re-parsed and compared structurally,
//! ignoring spans. A missing pair of parentheses changes the tree shape.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use shroud_fmt::print_expr;
use shroud_ir::{
    BigInt, BinaryOp, BoolOp, CmpOp, Constant, Expr, ExprContext, ExprKind, Span, StmtKind,
    UnaryOp,
};

fn leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (0u32..1000).prop_map(|n| Expr::new(
            ExprKind::Constant(Constant::Int(BigInt::from(n))),
            Span::DUMMY
        )),
        "[a-e]".prop_map(|id| Expr::new(
            ExprKind::Name {
                id,
                ctx: ExprContext::Load
            },
            Span::DUMMY
        )),
    ]
}

fn binary_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Sub),
        Just(BinaryOp::Mul),
        Just(BinaryOp::FloorDiv),
        Just(BinaryOp::Pow),
        Just(BinaryOp::LShift),
        Just(BinaryOp::BitOr),
        Just(BinaryOp::BitXor),
        Just(BinaryOp::BitAnd),
    ]
}

fn unary_op() -> impl Strategy<Value = UnaryOp> {
    prop_oneof![
        Just(UnaryOp::Not),
        Just(UnaryOp::USub),
        Just(UnaryOp::Invert),
    ]
}

fn expr_tree() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(6, 48, 3, |inner| {
        prop_oneof![
            (inner.clone(), binary_op(), inner.clone()).prop_map(|(l, op, r)| Expr::new(
                ExprKind::BinOp {
                    left: Box::new(l),
                    op,
                    right: Box::new(r)
                },
                Span::DUMMY
            )),
            (unary_op(), inner.clone()).prop_map(|(op, operand)| Expr::new(
                ExprKind::UnaryOp {
                    op,
                    operand: Box::new(operand)
                },
                Span::DUMMY
            )),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::new(
                ExprKind::BoolOp {
                    op: BoolOp::And,
                    values: vec![a, b]
                },
                Span::DUMMY
            )),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::new(
                ExprKind::BoolOp {
                    op: BoolOp::Or,
                    values: vec![a, b]
                },
                Span::DUMMY
            )),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::new(
                ExprKind::Compare {
                    left: Box::new(a),
                    ops: vec![CmpOp::Lt],
                    comparators: vec![b]
                },
                Span::DUMMY
            )),
            (inner.clone(), inner.clone(), inner).prop_map(|(t, b, o)| Expr::new(
                ExprKind::IfExp {
                    test: Box::new(t),
                    body: Box::new(b),
                    orelse: Box::new(o)
                },
                Span::DUMMY
            )),
        ]
    })
}

/// Span-free rendering of the tree shape.
fn shape(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Constant(Constant::Int(n)) => n.to_string(),
        ExprKind::Name { id, .. } => id.clone(),
        ExprKind::BinOp { left, op, right } => {
            format!("({} {} {})", op.as_symbol(), shape(left), shape(right))
        }
        ExprKind::UnaryOp { op, operand } => format!("({}{})", op.as_symbol(), shape(operand)),
        ExprKind::BoolOp { op, values } => {
            let values: Vec<String> = values.iter().map(shape).collect();
            format!("({} {})", op.as_symbol(), values.join(" "))
        }
        ExprKind::Compare {
            left,
            ops,
            comparators,
        } => {
            let mut out = format!("(cmp {}", shape(left));
            for (op, right) in ops.iter().zip(comparators) {
                out.push_str(&format!(" {} {}", op.as_symbol(), shape(right)));
            }
            out.push(')');
            out
        }
        ExprKind::IfExp { test, body, orelse } => {
            format!("(if {} {} {})", shape(test), shape(body), shape(orelse))
        }
        other => panic!("unexpected node {other:?}"),
    }
}

fn reparse(text: &str) -> Expr {
    let module = shroud_parse::parse(&format!("{text}\n")).unwrap();
    match module.body.into_iter().next().map(|s| s.kind) {
        Some(StmtKind::Expr(expr)) => expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn printed_expression_reparses_to_same_shape(expr in expr_tree()) {
        let text = print_expr(&expr);
        let back = reparse(&text);
        prop_assert_eq!(shape(&expr), shape(&back), "printed as {}", text);
    }
}
