//! String literal cooking: prefix parsing and escape processing.

use shroud_ir::Span;

use crate::lex_error::{LexError, LexErrorKind};

/// Flags from a string literal prefix (`rb`, `f`, ...).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct StringPrefix {
    pub raw: bool,
    pub bytes: bool,
    pub fstring: bool,
}

/// A string literal split into prefix flags and body.
#[derive(Debug)]
pub(crate) struct Literal<'a> {
    pub prefix: StringPrefix,
    pub body: &'a str,
    /// Absolute byte offset of `body` in the source.
    pub body_offset: u32,
}

/// Split a full literal slice (`rb'''...'''`) into prefix and body.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets bounded by u32 - entire source file < u32::MAX bytes"
)]
pub(crate) fn split_literal(slice: &str, span: Span) -> Result<Literal<'_>, LexError> {
    let quote_at = slice
        .find(['\'', '"'])
        .ok_or_else(|| LexError::new(LexErrorKind::UnterminatedString, span))?;
    let prefix_text = &slice[..quote_at];
    let prefix = parse_prefix(prefix_text)
        .ok_or_else(|| LexError::new(LexErrorKind::InvalidStringPrefix(prefix_text.into()), span))?;

    let quoted = &slice[quote_at..];
    let quote = &quoted[..1];
    let triple = quoted.len() >= 6 && quoted.starts_with(&quote.repeat(3));
    let width = if triple { 3 } else { 1 };
    if quoted.len() < 2 * width {
        return Err(LexError::new(LexErrorKind::UnterminatedString, span));
    }
    Ok(Literal {
        prefix,
        body: &quoted[width..quoted.len() - width],
        body_offset: span.start + (quote_at + width) as u32,
    })
}

fn parse_prefix(text: &str) -> Option<StringPrefix> {
    let mut prefix = StringPrefix::default();
    let mut unicode = false;
    for c in text.chars() {
        let flag = match c.to_ascii_lowercase() {
            'r' => &mut prefix.raw,
            'b' => &mut prefix.bytes,
            'f' => &mut prefix.fstring,
            'u' => &mut unicode,
            _ => return None,
        };
        if *flag {
            return None;
        }
        *flag = true;
    }
    let valid = match (unicode, prefix.bytes, prefix.fstring) {
        (true, false, false) => !prefix.raw,
        (false, true, true) => false,
        (false, _, _) => true,
        _ => false,
    };
    valid.then_some(prefix)
}

/// Which escapes apply: `\u`, `\U` and `\N` only exist in text literals.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum EscapeMode {
    Text,
    Bytes,
}

/// Resolve backslash escapes in `body`.
///
/// Unknown escapes keep their backslash, as the runtime does. In bytes mode
/// `\xhh` and octal escapes produce code points below 256 that the caller
/// narrows to bytes.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets bounded by u32 - entire source file < u32::MAX bytes"
)]
pub(crate) fn cook_escapes(body: &str, offset: u32, mode: EscapeMode) -> Result<String, LexError> {
    if !body.contains('\\') {
        return Ok(body.to_string());
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let esc_span = |len: usize| {
            let start = offset + i as u32;
            Span::new(start, start + len as u32)
        };
        let Some((_, esc)) = chars.next() else {
            out.push('\\');
            break;
        };
        match esc {
            '\n' => {}
            '\r' => {
                if chars.peek().is_some_and(|&(_, c)| c == '\n') {
                    chars.next();
                }
            }
            '\\' | '\'' | '"' => out.push(esc),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0C'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0B'),
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|&(_, c)| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                let cooked = char::from_u32(value)
                    .ok_or_else(|| LexError::new(LexErrorKind::InvalidEscape(esc), esc_span(2)))?;
                out.push(cooked);
            }
            'x' => out.push(take_hex(&mut chars, 2, esc, esc_span(4))?),
            'u' if mode == EscapeMode::Text => out.push(take_hex(&mut chars, 4, esc, esc_span(6))?),
            'U' if mode == EscapeMode::Text => {
                out.push(take_hex(&mut chars, 8, esc, esc_span(10))?);
            }
            'N' if mode == EscapeMode::Text => {
                return Err(LexError::new(LexErrorKind::NamedUnicodeEscape, esc_span(2)));
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    Ok(out)
}

fn take_hex(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    digits: usize,
    esc: char,
    span: Span,
) -> Result<char, LexError> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or_else(|| LexError::new(LexErrorKind::InvalidEscape(esc), span))?;
        value = value * 16 + digit;
    }
    char::from_u32(value).ok_or_else(|| LexError::new(LexErrorKind::InvalidEscape(esc), span))
}

/// Narrow cooked bytes-literal text to raw bytes.
pub(crate) fn into_bytes(text: &str, span: Span) -> Result<Vec<u8>, LexError> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).map_err(|_| LexError::new(LexErrorKind::NonAsciiBytes, span)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cook(body: &str) -> String {
        match cook_escapes(body, 0, EscapeMode::Text) {
            Ok(text) => text,
            Err(err) => panic!("cooking {body:?} failed: {err}"),
        }
    }

    #[test]
    fn simple_escapes() {
        assert_eq!(cook(r"a\nb\tc"), "a\nb\tc");
        assert_eq!(cook(r#"\'\"\\"#), "'\"\\");
        assert_eq!(cook(r"\a\b\f\v\r"), "\x07\x08\x0C\x0B\r");
    }

    #[test]
    fn numeric_escapes() {
        assert_eq!(cook(r"\x41\101é\U0001F600"), "AAé😀");
        assert_eq!(cook(r"\0"), "\0");
    }

    #[test]
    fn unknown_escape_keeps_backslash() {
        assert_eq!(cook(r"\d+\q"), "\\d+\\q");
    }

    #[test]
    fn line_continuation_inside_literal() {
        assert_eq!(cook("ab\\\ncd"), "abcd");
    }

    #[test]
    fn malformed_hex_is_an_error() {
        let err = cook_escapes(r"\x4", 10, EscapeMode::Text);
        assert!(matches!(
            err,
            Err(LexError {
                kind: LexErrorKind::InvalidEscape('x'),
                ..
            })
        ));
    }

    #[test]
    fn bytes_mode_keeps_unicode_escapes_literal() {
        let cooked = cook_escapes(r"\x00\xff\u1234", 0, EscapeMode::Bytes);
        assert_eq!(cooked, Ok("\u{0}\u{ff}\\u1234".to_string()));
        let bytes = into_bytes("\u{0}\u{ff}A", Span::DUMMY);
        assert_eq!(bytes, Ok(vec![0, 255, b'A']));
    }

    #[test]
    fn prefixes() {
        let raw_bytes = split_literal("rb'x'", Span::new(0, 5));
        let Ok(lit) = raw_bytes else {
            panic!("rb prefix rejected");
        };
        assert!(lit.prefix.raw && lit.prefix.bytes && !lit.prefix.fstring);
        assert_eq!(lit.body, "x");
        assert_eq!(lit.body_offset, 3);

        let Ok(triple) = split_literal(r#""""a"b""""#, Span::new(0, 10)) else {
            panic!("triple-quoted literal rejected");
        };
        assert_eq!(triple.body, "a\"b");

        assert!(split_literal("bf'x'", Span::new(0, 5)).is_err());
        assert!(split_literal("ur'x'", Span::new(0, 5)).is_err());
        assert!(split_literal("U'x'", Span::new(0, 4)).is_ok());
    }
}
