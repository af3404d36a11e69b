//! Parameter lists for `def` and `lambda`.

use shroud_ir::{Arguments, Parameter, TokenKind};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse parameters up to (not including) `closing`.
    ///
    /// Lambda parameters end at `:` and cannot carry annotations.
    pub(crate) fn parse_parameters(
        &mut self,
        closing: &TokenKind,
        annotations: bool,
    ) -> Result<Arguments, ParseError> {
        let mut args = Arguments::default();
        let mut seen_slash = false;
        let mut seen_star = false;
        let mut seen_default = false;

        while !self.check(closing) {
            let start = self.current_span();
            match self.current_kind() {
                TokenKind::Slash => {
                    self.advance();
                    if seen_slash || seen_star || args.args.is_empty() {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidParameters("misplaced '/'"),
                            start,
                        ));
                    }
                    seen_slash = true;
                    args.posonlyargs = std::mem::take(&mut args.args);
                }
                TokenKind::Star => {
                    self.advance();
                    if seen_star {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidParameters("'*' may appear only once"),
                            start,
                        ));
                    }
                    seen_star = true;
                    if !self.check(&TokenKind::Comma) && !self.check(closing) {
                        args.vararg = Some(self.parse_parameter(annotations, false)?);
                    }
                }
                TokenKind::DoubleStar => {
                    self.advance();
                    args.kwarg = Some(self.parse_parameter(annotations, false)?);
                    self.eat(&TokenKind::Comma);
                    if !self.check(closing) {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidParameters(
                                "arguments cannot follow var-keyword argument",
                            ),
                            self.current_span(),
                        ));
                    }
                    break;
                }
                _ => {
                    let param = self.parse_parameter(annotations, true)?;
                    if seen_star {
                        args.kwonlyargs.push(param);
                    } else {
                        if param.default.is_some() {
                            seen_default = true;
                        } else if seen_default {
                            return Err(ParseError::new(
                                ParseErrorKind::NonDefaultAfterDefault,
                                param.span,
                            ));
                        }
                        args.args.push(param);
                    }
                }
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        if seen_star && args.vararg.is_none() && args.kwonlyargs.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidParameters("named arguments must follow bare '*'"),
                self.current_span(),
            ));
        }
        Ok(args)
    }

    fn parse_parameter(
        &mut self,
        annotations: bool,
        defaults: bool,
    ) -> Result<Parameter, ParseError> {
        let (name, start) = self.expect_name()?;
        let annotation = if annotations && self.eat(&TokenKind::Colon) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let default = if defaults && self.eat(&TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(Parameter {
            name,
            annotation,
            default,
            span: start.merge(self.previous_span()),
        })
    }
}
