//! Shroud IR - syntax tree types for Python source
//!
//! This crate contains the data structures shared by every stage of the
//! obfuscator:
//! - Spans and line/column lookup for diagnostics
//! - The syntax tree (`Module`, `Stmt`, `Expr`, parameters, keywords, imports)
//! - Tokens shared by the lexer and parser
//! - A read-only `Visitor` for whole-tree scans
//! - Reserved-word and built-in name tables of the target runtime
//!
//! # Design Philosophy
//!
//! - **Closed variants**: every construct is a variant of `StmtKind` or
//!   `ExprKind`; passes match exhaustively.
//! - **Replace, don't retag**: rewriting a node means building a new `Expr`
//!   or `Stmt` value and assigning it over the old one.
//! - **Raw leaf**: `ExprKind::Raw` holds synthesized expression text that the
//!   printer emits verbatim.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
pub mod builtins;
mod line_index;
mod span;
pub mod token;
pub mod visitor;

pub use ast::{
    Alias, Arguments, BinaryOp, BoolOp, ClassDef, CmpOp, Comprehension, Constant, Conversion,
    ExceptHandler, Expr, ExprContext, ExprKind, FStringPart, FunctionDef, InterpolationSlot,
    Keyword, MatchCase, Module, Parameter, Pattern, PatternKind, Stmt, StmtKind, UnaryOp,
    WithItem,
};
pub use line_index::LineIndex;
pub use num_bigint::{BigInt, Sign};
pub use span::{Span, SpanError};
pub use token::{FStringSegment, FStringSlot, Token, TokenKind, TokenList};
pub use visitor::Visitor;
