//! Expression nodes.

use num_bigint::BigInt;

use super::operators::{BinaryOp, BoolOp, CmpOp, UnaryOp};
use super::stmt::Arguments;
use crate::Span;

/// Whether a name, attribute or subscript is read, written or deleted.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ExprContext {
    #[default]
    Load,
    Store,
    Del,
}

/// Expression node.
#[derive(Clone, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Synthesized expression printed verbatim.
    pub fn raw(text: impl Into<String>) -> Self {
        Expr::new(ExprKind::Raw(text.into()), Span::DUMMY)
    }

    /// Synthesized load of a bare identifier.
    pub fn name(id: impl Into<String>) -> Self {
        Expr::new(
            ExprKind::Name {
                id: id.into(),
                ctx: ExprContext::Load,
            },
            Span::DUMMY,
        )
    }

    /// Identifier text if this is a bare `Name`.
    pub fn as_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Name { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Expression variants.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    /// `a and b and c`
    BoolOp { op: BoolOp, values: Vec<Expr> },
    /// `target := value`
    NamedExpr {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    UnaryOp { op: UnaryOp, operand: Box<Expr> },
    Lambda {
        args: Box<Arguments>,
        body: Box<Expr>,
    },
    /// `body if test else orelse`
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },
    /// `None` keys mark `**mapping` unpacking.
    Dict {
        keys: Vec<Option<Expr>>,
        values: Vec<Expr>,
    },
    Set(Vec<Expr>),
    ListComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    SetComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    DictComp {
        key: Box<Expr>,
        value: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    GeneratorExp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    Await(Box<Expr>),
    Yield(Option<Box<Expr>>),
    YieldFrom(Box<Expr>),
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<Keyword>,
    },
    /// Interpolated string literal.
    FString(Vec<FStringPart>),
    Constant(Constant),
    Attribute {
        value: Box<Expr>,
        attr: String,
        ctx: ExprContext,
    },
    Subscript {
        value: Box<Expr>,
        slice: Box<Expr>,
        ctx: ExprContext,
    },
    Starred { value: Box<Expr>, ctx: ExprContext },
    Name { id: String, ctx: ExprContext },
    List { elts: Vec<Expr>, ctx: ExprContext },
    Tuple { elts: Vec<Expr>, ctx: ExprContext },
    Slice {
        lower: Option<Box<Expr>>,
        upper: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
    /// Synthesized expression text, printed without quoting or escaping.
    Raw(String),
}

/// Literal constants.
#[derive(Clone, PartialEq, Debug)]
pub enum Constant {
    None,
    Bool(bool),
    Str(String),
    Bytes(Vec<u8>),
    Int(BigInt),
    Float(f64),
    /// Imaginary literal `3j`; holds the imaginary part.
    Imaginary(f64),
    Ellipsis,
}

/// One `for ... in ... if ...` clause of a comprehension.
#[derive(Clone, PartialEq, Debug)]
pub struct Comprehension {
    pub target: Expr,
    pub iter: Expr,
    pub ifs: Vec<Expr>,
    pub is_async: bool,
}

/// `name=value` or `**value` (when `arg` is `None`) in a call.
#[derive(Clone, PartialEq, Debug)]
pub struct Keyword {
    pub arg: Option<String>,
    pub value: Expr,
    pub span: Span,
}

/// Segment of an interpolated string.
#[derive(Clone, PartialEq, Debug)]
pub enum FStringPart {
    /// Literal text, already unescaped.
    Literal(String),
    Slot(InterpolationSlot),
}

/// `{value!conversion:format_spec}` inside an interpolated string.
#[derive(Clone, PartialEq, Debug)]
pub struct InterpolationSlot {
    pub value: Box<Expr>,
    pub conversion: Option<Conversion>,
    pub format_spec: Vec<FStringPart>,
}

/// `!s`, `!r`, `!a`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Conversion {
    Str,
    Repr,
    Ascii,
}

impl Conversion {
    pub const fn as_char(self) -> char {
        match self {
            Self::Str => 's',
            Self::Repr => 'r',
            Self::Ascii => 'a',
        }
    }
}
