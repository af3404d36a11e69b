//! Expression binding strength, weakest first.
//!
//! An expression printed where a stronger binding is required gets
//! parentheses. The levels mirror the Python grammar's precedence table.

use shroud_ir::{BinaryOp, BoolOp, Constant, Expr, ExprKind, Sign, UnaryOp};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Precedence {
    /// `x := v`
    NamedExpr,
    /// `a, b`
    Tuple,
    /// `yield v`
    Yield,
    /// `lambda`, `a if c else b`
    Test,
    Or,
    And,
    Not,
    /// Comparisons, `in`, `is`
    Cmp,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    /// `+`, `-`
    Arith,
    /// `*`, `@`, `/`, `//`, `%`
    Term,
    /// Unary `+`, `-`, `~`
    Factor,
    Power,
    Await,
    Atom,
}

impl Precedence {
    /// The next tighter level.
    pub const fn next(self) -> Self {
        match self {
            Self::NamedExpr => Self::Tuple,
            Self::Tuple => Self::Yield,
            Self::Yield => Self::Test,
            Self::Test => Self::Or,
            Self::Or => Self::And,
            Self::And => Self::Not,
            Self::Not => Self::Cmp,
            Self::Cmp => Self::BitOr,
            Self::BitOr => Self::BitXor,
            Self::BitXor => Self::BitAnd,
            Self::BitAnd => Self::Shift,
            Self::Shift => Self::Arith,
            Self::Arith => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Power,
            Self::Power => Self::Await,
            Self::Await | Self::Atom => Self::Atom,
        }
    }

    pub const fn of_binary(op: BinaryOp) -> Self {
        match op {
            BinaryOp::BitOr => Self::BitOr,
            BinaryOp::BitXor => Self::BitXor,
            BinaryOp::BitAnd => Self::BitAnd,
            BinaryOp::LShift | BinaryOp::RShift => Self::Shift,
            BinaryOp::Add | BinaryOp::Sub => Self::Arith,
            BinaryOp::Mul
            | BinaryOp::MatMul
            | BinaryOp::Div
            | BinaryOp::FloorDiv
            | BinaryOp::Mod => Self::Term,
            BinaryOp::Pow => Self::Power,
        }
    }

    pub const fn of_bool(op: BoolOp) -> Self {
        match op {
            BoolOp::Or => Self::Or,
            BoolOp::And => Self::And,
        }
    }

    pub const fn of_unary(op: UnaryOp) -> Self {
        match op {
            UnaryOp::Not => Self::Not,
            UnaryOp::Invert | UnaryOp::UAdd | UnaryOp::USub => Self::Factor,
        }
    }

    /// Binding strength of an expression as printed.
    ///
    /// Tuples are always printed inside their own parentheses, so they bind
    /// like atoms.
    pub fn of(expr: &Expr) -> Self {
        match &expr.kind {
            ExprKind::NamedExpr { .. } => Self::NamedExpr,
            ExprKind::Yield(_) | ExprKind::YieldFrom(_) => Self::Yield,
            ExprKind::Lambda { .. } | ExprKind::IfExp { .. } => Self::Test,
            ExprKind::BoolOp { op, .. } => Self::of_bool(*op),
            ExprKind::UnaryOp { op, .. } => Self::of_unary(*op),
            ExprKind::Compare { .. } => Self::Cmp,
            ExprKind::BinOp { op, .. } => Self::of_binary(*op),
            ExprKind::Await(_) => Self::Await,
            ExprKind::Constant(Constant::Int(value)) if value.sign() == Sign::Minus => {
                Self::Factor
            }
            ExprKind::Constant(Constant::Float(value) | Constant::Imaginary(value))
                if value.is_sign_negative() =>
            {
                Self::Factor
            }
            _ => Self::Atom,
        }
    }
}
