//! Interpolated string printing.
//!
//! Replacement-field expressions are printed first so the outer quote can be
//! chosen to avoid every quote character they use.

use shroud_ir::{FStringPart, InterpolationSlot};

use super::literals::push_escaped_char;
use super::Printer;
use crate::emitter::{Emitter, StringEmitter};
use crate::precedence::Precedence;

const QUOTES: [&str; 4] = ["'", "\"", "'''", "\"\"\""];

impl<E: Emitter> Printer<E> {
    pub(super) fn fstring(&mut self, parts: &[FStringPart]) {
        let mut fields = Vec::new();
        collect_fields(parts, &mut fields);
        let quote = QUOTES
            .iter()
            .copied()
            .find(|q| fields.iter().all(|field| !field.contains(q)))
            .unwrap_or(QUOTES[0]);

        let mut body = String::new();
        let mut fields = fields.into_iter();
        render_parts(parts, quote, &mut fields, &mut body);

        self.emit("f");
        self.emit(quote);
        self.emit(&body);
        self.emit(quote);
    }
}

/// Print a replacement-field expression on its own.
fn field_text(slot: &InterpolationSlot) -> String {
    let mut printer = Printer::new(StringEmitter::new());
    printer.expr(&slot.value, Precedence::Test.next());
    let mut text = printer.finish().output();
    // `{{` would read as an escaped brace
    if text.starts_with('{') {
        text.insert(0, ' ');
    }
    text
}

fn collect_fields(parts: &[FStringPart], fields: &mut Vec<String>) {
    for part in parts {
        if let FStringPart::Slot(slot) = part {
            fields.push(field_text(slot));
            collect_fields(&slot.format_spec, fields);
        }
    }
}

fn render_parts(
    parts: &[FStringPart],
    quote: &str,
    fields: &mut impl Iterator<Item = String>,
    out: &mut String,
) {
    let quote_char = quote.chars().next().unwrap_or('\'');
    for part in parts {
        match part {
            FStringPart::Literal(text) => {
                for c in text.chars() {
                    match c {
                        '{' => out.push_str("{{"),
                        '}' => out.push_str("}}"),
                        _ => push_escaped_char(out, c, quote_char),
                    }
                }
            }
            FStringPart::Slot(slot) => {
                out.push('{');
                out.push_str(&fields.next().unwrap_or_default());
                if let Some(conversion) = slot.conversion {
                    out.push('!');
                    out.push(conversion.as_char());
                }
                if !slot.format_spec.is_empty() {
                    out.push(':');
                    render_parts(&slot.format_spec, quote, fields, out);
                }
                out.push('}');
            }
        }
    }
}
