//! Syntax tree types.
//!
//! # Module Structure
//!
//! - `expr`: expressions, constants, comprehensions, keywords, f-string parts
//! - `stmt`: statements, definitions, parameters, imports
//! - `pattern`: `match` cases and their patterns
//! - `operators`: boolean, binary, unary and comparison operators

mod expr;
mod operators;
mod pattern;
mod stmt;

pub use expr::{
    Comprehension, Constant, Conversion, Expr, ExprContext, ExprKind, FStringPart,
    InterpolationSlot, Keyword,
};
pub use operators::{BinaryOp, BoolOp, CmpOp, UnaryOp};
pub use pattern::{MatchCase, Pattern, PatternKind};
pub use stmt::{
    Alias, Arguments, ClassDef, ExceptHandler, FunctionDef, Module, Parameter, Stmt, StmtKind,
    WithItem,
};
