//! `match` statement patterns.

use super::expr::Expr;
use super::stmt::Stmt;
use crate::Span;

/// One `case pattern [if guard]: body` clause.
#[derive(Clone, PartialEq, Debug)]
pub struct MatchCase {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

impl Pattern {
    #[inline]
    pub fn new(kind: PatternKind, span: Span) -> Self {
        Pattern { kind, span }
    }
}

/// Pattern variants.
///
/// Sequence patterns do not record their bracket style; `[a, b]` and
/// `(a, b)` match the same subjects.
#[derive(Clone, PartialEq, Debug)]
pub enum PatternKind {
    /// Literal or dotted-name value: `1`, `-2.5`, `'go'`, `None`, `Color.RED`.
    Value(Expr),
    Sequence(Vec<Pattern>),
    /// `{key: pattern, ..., **rest}`; keys are literal or dotted values.
    Mapping {
        keys: Vec<Expr>,
        patterns: Vec<Pattern>,
        rest: Option<String>,
    },
    /// `Cls(p, ..., attr=p, ...)`
    Class {
        cls: Expr,
        patterns: Vec<Pattern>,
        kwd_attrs: Vec<String>,
        kwd_patterns: Vec<Pattern>,
    },
    /// `*name` inside a sequence; `None` for `*_`.
    Star(Option<String>),
    /// `pattern as name`, a bare capture (`pattern` is `None`) or the
    /// wildcard `_` (both `None`).
    As {
        pattern: Option<Box<Pattern>>,
        name: Option<String>,
    },
    /// `p | q | ...`
    Or(Vec<Pattern>),
}

impl PatternKind {
    /// The wildcard `_`.
    pub fn is_wildcard(&self) -> bool {
        matches!(
            self,
            PatternKind::As {
                pattern: None,
                name: None
            }
        )
    }
}
