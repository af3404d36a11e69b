//! Shroud Printer
//!
//! Turns a syntax tree back into Python source text.
//!
//! # Architecture
//!
//! Printing is a single top-down pass. Each expression is printed against the
//! precedence of its context and parenthesized only when its own precedence is
//! lower, so the output re-parses to the same tree. Statements are printed one
//! per line with four-space indentation.
//!
//! `ExprKind::Raw` leaves are written verbatim. The obfuscator uses them for
//! synthesized expression text (escaped literals, reflective lookups), which
//! therefore never passes through string quoting.
//!
//! # Modules
//!
//! - [`emitter`]: Output abstraction
//! - [`precedence`]: Expression binding strength
//! - `printer`: Statement, expression and literal rendering

pub mod emitter;
pub mod precedence;
mod printer;

pub use emitter::{Emitter, StringEmitter};
pub use precedence::Precedence;
pub use printer::{quote_bytes, quote_str, Printer, INDENT_WIDTH};

use shroud_ir::{Expr, Module};

/// Print a whole module.
///
/// # Example
///
/// ```
/// use shroud_fmt::print_module;
/// use shroud_ir::{Expr, Module, Stmt, StmtKind, Span};
///
/// let module = Module {
///     body: vec![Stmt::new(StmtKind::Expr(Expr::raw("print()")), Span::DUMMY)],
/// };
/// assert_eq!(print_module(&module), "print()\n");
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(statements = module.body.len()))]
pub fn print_module(module: &Module) -> String {
    let mut printer = Printer::new(StringEmitter::new());
    printer.module(module);
    let text = printer.finish().output();
    tracing::debug!(bytes = text.len(), "printed");
    text
}

/// Print a single expression with no surrounding context.
pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::new(StringEmitter::new());
    printer.expr(expr, Precedence::Tuple);
    printer.finish().output()
}
