//! Printer Core
//!
//! `Printer` owns the emitter and the current indentation. Rendering is split
//! by node family:
//!
//! - `stmt`: statements, blocks, parameters
//! - `pattern`: `case` clauses and their patterns
//! - `expr`: expressions and precedence parentheses
//! - `fstring`: interpolated strings
//! - `literals`: constants and string quoting

mod expr;
mod fstring;
mod literals;
mod pattern;
mod stmt;

use crate::emitter::Emitter;

pub use literals::{quote_bytes, quote_str};

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

pub struct Printer<E: Emitter> {
    out: E,
    indent: usize,
}

impl<E: Emitter> Printer<E> {
    pub fn new(out: E) -> Self {
        Printer { out, indent: 0 }
    }

    /// Consume the printer and return its emitter.
    pub fn finish(self) -> E {
        self.out
    }

    #[inline]
    fn emit(&mut self, text: &str) {
        self.out.emit(text);
    }

    /// Start a new line at the current indentation.
    fn start_line(&mut self) {
        self.out.emit_indent(self.indent * INDENT_WIDTH);
    }

    fn end_line(&mut self) {
        self.out.emit_newline();
    }

    /// Emit `items` separated by `", "`.
    fn comma_separated<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            each(self, item);
        }
    }
}
