//! Lexer for Python source using logos.
//!
//! ```text
//! source → RawToken (logos) → convert_token → Layout → TokenList
//! ```
//!
//! The raw scanner recognizes token shapes only. Conversion resolves
//! keywords, parses numbers and cooks string literals (including f-string
//! bodies). The layout pass turns line structure into `Newline`, `Indent`
//! and `Dedent` tokens.

mod cook_escape;
mod fstring;
mod layout;
mod lex_error;
mod raw_token;

use logos::Logos;
use num_bigint::BigInt;
use shroud_ir::{BinaryOp, Span, TokenKind, TokenList};

use crate::cook_escape::{cook_escapes, into_bytes, split_literal, EscapeMode};
use crate::layout::Layout;
use crate::raw_token::RawToken;

pub use lex_error::{LexError, LexErrorKind};

/// Lex a whole source file.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let tokens = lex_with(source, 0, 0)?;
    tracing::debug!(tokens = tokens.len(), "lexed");
    Ok(tokens)
}

/// Lex an expression embedded in another file (an f-string field).
///
/// Spans are shifted by `base`; newlines are insignificant and no layout
/// tokens are produced.
pub fn lex_expression(source: &str, base: u32) -> Result<TokenList, LexError> {
    lex_with(source, base, 1)
}

fn lex_with(source: &str, base: u32, depth: u32) -> Result<TokenList, LexError> {
    let mut layout = Layout::new(source, base, depth);
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let local = Span::try_from_range(logos.span()).map_err(|_| too_large(source, base))?;
        let span = Span::new(local.start + base, local.end + base);
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::Comment | RawToken::LineContinuation) => {}
            Ok(RawToken::Newline) => layout.newline(span),
            Ok(raw) => {
                let kind = convert_token(raw, slice, span)?;
                layout.token(kind, span)?;
            }
            Err(()) => return Err(error_for(slice, span)),
        }
    }

    Ok(layout.finish())
}

#[cold]
fn too_large(source: &str, base: u32) -> LexError {
    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    LexError::new(
        LexErrorKind::SourceTooLarge,
        Span::new(base, base.saturating_add(end)),
    )
}

/// Classify a slice logos could not match.
#[cold]
fn error_for(slice: &str, span: Span) -> LexError {
    let kind = match slice.chars().last() {
        Some('\'' | '"') => LexErrorKind::UnterminatedString,
        Some(c) => LexErrorKind::InvalidCharacter(c),
        None => LexErrorKind::UnterminatedString,
    };
    LexError::new(kind, span)
}

/// Convert a raw token to a `TokenKind`.
fn convert_token(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    let kind = match raw {
        // Literals
        RawToken::Ident => {
            TokenKind::keyword(slice).unwrap_or_else(|| TokenKind::Name(slice.to_string()))
        }
        RawToken::Int => TokenKind::Int(parse_int(slice, 10, span)?),
        RawToken::HexInt => TokenKind::Int(parse_int(&slice[2..], 16, span)?),
        RawToken::OctInt => TokenKind::Int(parse_int(&slice[2..], 8, span)?),
        RawToken::BinInt => TokenKind::Int(parse_int(&slice[2..], 2, span)?),
        RawToken::Float => TokenKind::Float(parse_float(slice, span)?),
        RawToken::Imaginary => TokenKind::Imaginary(parse_float(&slice[..slice.len() - 1], span)?),
        RawToken::String => convert_string(slice, span)?,

        // Delimiters
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::ColonEq => TokenKind::ColonEq,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Arrow => TokenKind::Arrow,

        // Comparison
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,

        // Operators
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::DoubleStar => TokenKind::DoubleStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::DoubleSlash => TokenKind::DoubleSlash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::At => TokenKind::At,
        RawToken::LShift => TokenKind::LShift,
        RawToken::RShift => TokenKind::RShift,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Tilde => TokenKind::Tilde,

        // Augmented assignment
        RawToken::PlusEq => TokenKind::AugAssign(BinaryOp::Add),
        RawToken::MinusEq => TokenKind::AugAssign(BinaryOp::Sub),
        RawToken::StarEq => TokenKind::AugAssign(BinaryOp::Mul),
        RawToken::DoubleStarEq => TokenKind::AugAssign(BinaryOp::Pow),
        RawToken::SlashEq => TokenKind::AugAssign(BinaryOp::Div),
        RawToken::DoubleSlashEq => TokenKind::AugAssign(BinaryOp::FloorDiv),
        RawToken::PercentEq => TokenKind::AugAssign(BinaryOp::Mod),
        RawToken::AtEq => TokenKind::AugAssign(BinaryOp::MatMul),
        RawToken::LShiftEq => TokenKind::AugAssign(BinaryOp::LShift),
        RawToken::RShiftEq => TokenKind::AugAssign(BinaryOp::RShift),
        RawToken::AmpEq => TokenKind::AugAssign(BinaryOp::BitAnd),
        RawToken::PipeEq => TokenKind::AugAssign(BinaryOp::BitOr),
        RawToken::CaretEq => TokenKind::AugAssign(BinaryOp::BitXor),

        // Trivia is filtered by the driver loop.
        RawToken::Comment | RawToken::Newline | RawToken::LineContinuation => {
            return Err(LexError::new(LexErrorKind::InvalidCharacter('\n'), span));
        }
    };
    Ok(kind)
}

fn parse_int(digits: &str, radix: u32, span: Span) -> Result<BigInt, LexError> {
    let cleaned = digits.replace('_', "");
    BigInt::parse_bytes(cleaned.as_bytes(), radix)
        .ok_or_else(|| LexError::new(LexErrorKind::InvalidNumber, span))
}

fn parse_float(text: &str, span: Span) -> Result<f64, LexError> {
    text.replace('_', "")
        .parse::<f64>()
        .map_err(|_| LexError::new(LexErrorKind::InvalidNumber, span))
}

fn convert_string(slice: &str, span: Span) -> Result<TokenKind, LexError> {
    let literal = split_literal(slice, span)?;
    let prefix = literal.prefix;

    if prefix.fstring {
        let segments = fstring::scan_fstring(literal.body, literal.body_offset, prefix.raw)?;
        return Ok(TokenKind::FString(segments));
    }

    let mode = if prefix.bytes {
        EscapeMode::Bytes
    } else {
        EscapeMode::Text
    };
    let text = if prefix.raw {
        literal.body.to_string()
    } else {
        cook_escapes(literal.body, literal.body_offset, mode)?
    };

    if prefix.bytes {
        Ok(TokenKind::Bytes(into_bytes(&text, span)?))
    } else {
        Ok(TokenKind::Str(text))
    }
}
