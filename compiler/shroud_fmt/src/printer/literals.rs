//! Literal Value Printing
//!
//! Strings and bytes are quoted the way the target runtime's `repr` does:
//! single quotes unless the text contains a single quote and no double quote.

use std::fmt::Write;

use shroud_ir::Constant;

use super::Printer;
use crate::emitter::Emitter;

impl<E: Emitter> Printer<E> {
    pub(super) fn constant(&mut self, constant: &Constant) {
        match constant {
            Constant::None => self.emit("None"),
            Constant::Bool(true) => self.emit("True"),
            Constant::Bool(false) => self.emit("False"),
            Constant::Ellipsis => self.emit("..."),
            Constant::Str(value) => self.emit(&quote_str(value)),
            Constant::Bytes(value) => self.emit(&quote_bytes(value)),
            Constant::Int(value) => self.emit(&value.to_string()),
            Constant::Float(value) => self.emit(&float_literal(*value)),
            Constant::Imaginary(value) => {
                let mut text = float_literal(*value);
                text.push('j');
                self.emit(&text);
            }
        }
    }
}

/// Shortest round-trip decimal form of a float.
///
/// Infinity has no literal; `1e309` overflows to it when read back.
pub(super) fn float_literal(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "1e309" } else { "-1e309" }.to_string();
    }
    format!("{value:?}")
}

fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

/// Quote a text string.
pub fn quote_str(value: &str) -> String {
    let quote = pick_quote(value.contains('\''), value.contains('"'));
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        push_escaped_char(&mut out, c, quote);
    }
    out.push(quote);
    out
}

/// Quote a bytes literal, with a `b` prefix.
pub fn quote_bytes(value: &[u8]) -> String {
    let quote = pick_quote(value.contains(&b'\''), value.contains(&b'"'));
    let mut out = String::with_capacity(value.len() + 3);
    out.push('b');
    out.push(quote);
    for &byte in value {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            _ if char::from(byte) == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "\\x{byte:02x}");
            }
        }
    }
    out.push(quote);
    out
}

/// Append `c` as it may appear between `quote` characters.
pub(super) fn push_escaped_char(out: &mut String, c: char, quote: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        _ if c == quote => {
            out.push('\\');
            out.push(c);
        }
        _ if u32::from(c) < 0x20 || c == '\x7f' => {
            let _ = write!(out, "\\x{:02x}", u32::from(c));
        }
        _ if c.is_control() || is_separator(c) => {
            let code = u32::from(c);
            if code <= 0xff {
                let _ = write!(out, "\\x{code:02x}");
            } else {
                let _ = write!(out, "\\u{code:04x}");
            }
        }
        _ => out.push(c),
    }
}

/// Line and paragraph separators, which would break a line if left raw.
fn is_separator(c: char) -> bool {
    matches!(c, '\u{2028}' | '\u{2029}' | '\u{85}')
}
