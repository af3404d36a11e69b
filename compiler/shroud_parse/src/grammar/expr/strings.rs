//! String literals: implicit concatenation of adjacent literals and parsing
//! of f-string replacement fields.

use shroud_ir::{
    Constant, Conversion, Expr, ExprKind, FStringPart, FStringSegment, FStringSlot,
    InterpolationSlot, TokenKind,
};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// One or more adjacent string tokens as a single constant or f-string.
    pub(crate) fn parse_strings(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span();
        let mut text = String::new();
        let mut bytes = Vec::new();
        let mut parts: Option<Vec<FStringPart>> = None;
        let mut saw_bytes = false;
        let mut saw_text = false;

        while self.current_kind().is_string() {
            let span = self.current_span();
            match self.current_kind() {
                TokenKind::Bytes(value) => {
                    saw_bytes = true;
                    bytes.extend_from_slice(value);
                }
                TokenKind::Str(value) => {
                    saw_text = true;
                    match &mut parts {
                        Some(parts) => push_literal(parts, value),
                        None => text.push_str(value),
                    }
                }
                TokenKind::FString(segments) => {
                    saw_text = true;
                    let parts = parts.get_or_insert_with(|| {
                        let mut parts = Vec::new();
                        push_literal(&mut parts, &std::mem::take(&mut text));
                        parts
                    });
                    convert_segments(segments, parts)?;
                }
                _ => break,
            }
            if saw_bytes && saw_text {
                return Err(ParseError::new(ParseErrorKind::MixedBytesAndStr, span));
            }
            self.advance();
        }

        let span = start.merge(self.previous_span());
        let kind = match parts {
            Some(parts) => ExprKind::FString(parts),
            None if saw_bytes => ExprKind::Constant(Constant::Bytes(bytes)),
            None => ExprKind::Constant(Constant::Str(text)),
        };
        Ok(Expr::new(kind, span))
    }
}

fn convert_segments(
    segments: &[FStringSegment],
    parts: &mut Vec<FStringPart>,
) -> Result<(), ParseError> {
    for segment in segments {
        match segment {
            FStringSegment::Literal(text) => push_literal(parts, text),
            FStringSegment::Slot(slot) => {
                if let Some(debug) = &slot.debug_text {
                    push_literal(parts, debug);
                }
                parts.push(FStringPart::Slot(convert_slot(slot)?));
            }
        }
    }
    Ok(())
}

fn convert_slot(slot: &FStringSlot) -> Result<InterpolationSlot, ParseError> {
    let value = parse_field_expression(slot)?;
    let mut format_spec = Vec::new();
    convert_segments(&slot.format_spec, &mut format_spec)?;
    // `{x=}` shows the repr unless a conversion or format spec is given.
    let conversion = match slot.conversion {
        None if slot.debug_text.is_some() && format_spec.is_empty() => {
            Some(Conversion::Repr)
        }
        conversion => conversion,
    };
    Ok(InterpolationSlot {
        value: Box::new(value),
        conversion,
        format_spec,
    })
}

/// Lex and parse the expression of a replacement field.
fn parse_field_expression(slot: &FStringSlot) -> Result<Expr, ParseError> {
    let tokens = shroud_lexer::lex_expression(&slot.source, slot.offset)?;
    let mut parser = Parser::new(&tokens);
    let value = if parser.check(&TokenKind::Yield) {
        parser.parse_yield_expression()?
    } else {
        parser.parse_star_expressions()?
    };
    if !parser.check(&TokenKind::Eof) {
        return Err(parser.unexpected("'}'"));
    }
    Ok(value)
}

/// Append literal text, merging with a preceding literal part.
fn push_literal(parts: &mut Vec<FStringPart>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(FStringPart::Literal(last)) = parts.last_mut() {
        last.push_str(text);
    } else {
        parts.push(FStringPart::Literal(text.to_string()));
    }
}
