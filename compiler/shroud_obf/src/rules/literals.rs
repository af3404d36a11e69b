//! Literal rules: strings, f-string segments, booleans and numbers.

use shroud_ir::{BigInt, Constant, Expr, ExprContext, ExprKind, FStringPart, InterpolationSlot};

use crate::config::{Categories, StringMode};
use crate::dispatch::Rewriter;
use crate::encode::{bool_idiom, encode_float, escape_literal, ONE_EXPR, ZERO_EXPR};
use crate::header::Tier;
use crate::ObfuscateError;

fn alias_expr(alias: &str, like: &Expr) -> Expr {
    Expr::new(
        ExprKind::Name {
            id: alias.to_string(),
            ctx: ExprContext::Load,
        },
        like.span,
    )
}

impl Rewriter<'_> {
    pub(crate) fn constant(&mut self, expr: &mut Expr) -> Result<(), ObfuscateError> {
        let ExprKind::Constant(constant) = &expr.kind else {
            return Ok(());
        };
        let alias = match constant {
            Constant::Str(value) if self.enabled(Categories::STRINGS) => {
                if self.encoder.mode() == StringMode::Direct && !self.in_slot() {
                    tracing::trace!(len = value.len(), "string: escaped in place");
                    *expr = Expr::new(ExprKind::Raw(escape_literal(value)), expr.span);
                    return Ok(());
                }
                let value = value.clone();
                self.string_alias(&value)?
            }
            Constant::Bool(value) if self.enabled(Categories::NUMBERS) => self.bool_alias(*value),
            Constant::Int(value) if self.enabled(Categories::NUMBERS) => {
                let value = value.clone();
                self.int_alias(&value)?
            }
            Constant::Float(value) if self.enabled(Categories::NUMBERS) => {
                self.float_alias(*value)
            }
            _ => None,
        };
        if let Some(alias) = alias {
            *expr = alias_expr(&alias, expr);
        }
        Ok(())
    }

    /// Replace every literal segment of an f-string with a slot over the
    /// alias of that segment's header entry.
    pub(crate) fn fstring_literals(&mut self, expr: &mut Expr) -> Result<(), ObfuscateError> {
        if !self.enabled(Categories::STRINGS) {
            return Ok(());
        }
        let span = expr.span;
        let ExprKind::FString(parts) = &mut expr.kind else {
            return Ok(());
        };
        for part in parts.iter_mut() {
            let FStringPart::Literal(text) = part else {
                continue;
            };
            let text = text.clone();
            if let Some(alias) = self.string_alias(&text)? {
                tracing::trace!(%alias, "f-string segment");
                *part = FStringPart::Slot(InterpolationSlot {
                    value: Box::new(Expr::new(
                        ExprKind::Name {
                            id: alias,
                            ctx: ExprContext::Load,
                        },
                        span,
                    )),
                    conversion: None,
                    format_spec: Vec::new(),
                });
            }
        }
        Ok(())
    }

    /// Header entries for 0 and 1, which every synthesized number uses.
    fn ensure_base(&mut self) {
        let zero = self.encoder.zero().to_string();
        let one = self.encoder.one().to_string();
        self.header.insert(&zero, ZERO_EXPR, Tier::Base);
        self.header.insert(&one, ONE_EXPR, Tier::Base);
    }

    fn bool_alias(&mut self, value: bool) -> Option<String> {
        let alias = self.table.bool(value)?.to_string();
        self.header.insert(&alias, bool_idiom(value), Tier::Base);
        tracing::trace!(%alias, value, "bool");
        Some(alias)
    }

    pub(crate) fn int_alias(&mut self, value: &BigInt) -> Result<Option<String>, ObfuscateError> {
        let Some(alias) = self.table.int(value) else {
            return Ok(None);
        };
        let alias = alias.to_string();
        self.ensure_base();
        if !self.header.contains(&alias) {
            let text = self.encoder.encode_int(value)?;
            self.header.insert(&alias, text, Tier::Value);
        }
        tracing::trace!(%alias, %value, "int");
        Ok(Some(alias))
    }

    fn float_alias(&mut self, value: f64) -> Option<String> {
        let alias = self.table.float(value)?.to_string();
        self.header.insert(&alias, encode_float(value), Tier::Value);
        tracing::trace!(%alias, value, "float");
        Some(alias)
    }

    /// Alias of a string's header entry, encoded in the configured mode.
    fn string_alias(&mut self, value: &str) -> Result<Option<String>, ObfuscateError> {
        let Some(alias) = self.table.string(value) else {
            return Ok(None);
        };
        let alias = alias.to_string();
        if self.header.contains(&alias) {
            return Ok(Some(alias));
        }
        if self.encoder.mode() == StringMode::Reduced {
            self.ensure_base();
        }
        let table = self.table;
        let header = &mut self.header;
        let text = self.encoder.encode_string(value, |encoder, c| {
            let code = BigInt::from(u32::from(c));
            match table.codepoint(c) {
                Some(alias) => {
                    if !header.contains(alias) {
                        let text = encoder.encode_int(&code)?;
                        header.insert(alias, text, Tier::Value);
                    }
                    Ok(alias.to_string())
                }
                None => encoder.encode_int(&code),
            }
        })?;
        self.header.insert(&alias, text, Tier::Derived);
        tracing::trace!(%alias, "string");
        Ok(Some(alias))
    }
}
