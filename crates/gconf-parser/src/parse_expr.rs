//! Value expression parsing.
//!
//! A value expression is recognised by its overall shape, tried in order:
//! 1. `${ ... }`: constant expression (arithmetic sub-language)
//! 2. `[ ... ]`: array, items split on top-level commas
//! 3. `'text'`: string literal
//! 4. number literal, optionally with an attached leading `-`
//! 5. bare name: reference to an earlier constant
//!
//! Anything else is an invalid expression.

use gconf_lexer::{Token, TokenKind, KEYWORD_GLOBAL};
use gconf_types::ast::{Expr, ExprKind};
use gconf_types::{ErrorCode, GconfError, Number, Span};

use crate::parser::{ParseResult, Parser};

impl<'src> Parser<'src> {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse a token slice as a value expression. `outer` locates errors for
    /// an empty slice.
    pub(crate) fn parse_value(&self, tokens: &[Token], outer: Span) -> ParseResult<Expr> {
        let (first, last) = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(self.error_at(
                    ErrorCode::INVALID_EXPRESSION,
                    "expected an expression",
                    outer,
                ))
            }
        };
        let span = first.span.to(last.span);

        if tokens.len() >= 2 {
            let inner = &tokens[1..tokens.len() - 1];
            match (&first.kind, &last.kind) {
                (TokenKind::DollarBrace, TokenKind::RBrace) => {
                    let math = self.parse_math(inner, span)?;
                    return Ok(Expr::new(ExprKind::Constant(Box::new(math)), span));
                }
                (TokenKind::LBracket, TokenKind::RBracket) => {
                    return self.parse_array(inner, span);
                }
                _ => {}
            }
        }

        match tokens {
            [tok] => match &tok.kind {
                TokenKind::StringLit(s) => {
                    return Ok(Expr::new(ExprKind::StringLit(s.clone()), span));
                }
                TokenKind::NumberLit(text) => return self.number_literal(text, false, span),
                TokenKind::Identifier(name) => {
                    return Ok(Expr::new(ExprKind::Identifier(name.clone()), span));
                }
                TokenKind::Global => {
                    return Ok(Expr::new(
                        ExprKind::Identifier(KEYWORD_GLOBAL.to_string()),
                        span,
                    ));
                }
                _ => {}
            },
            // `-3` is a literal only when the sign touches the digits.
            [minus, tok] if minus.kind == TokenKind::Minus && minus.span.is_adjacent_to(tok.span) => {
                if let TokenKind::NumberLit(text) = &tok.kind {
                    return self.number_literal(text, true, span);
                }
            }
            _ => {}
        }

        Err(self.invalid_expression(tokens, span))
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Arrays
    // ══════════════════════════════════════════════════════════════════════════

    /// Split the bracket contents on commas at nesting depth zero. Empty items
    /// are dropped, so `[1,,2]` and `[1, 2,]` both hold two values.
    fn parse_array(&self, inner: &[Token], span: Span) -> ParseResult<Expr> {
        let mut items = Vec::new();
        let mut depth: usize = 0;
        let mut item_start = 0;

        for (i, tok) in inner.iter().enumerate() {
            match tok.kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => {
                    depth = match depth.checked_sub(1) {
                        Some(d) => d,
                        None => {
                            return Err(self
                                .error_at(ErrorCode::MALFORMED_ARRAY, "unmatched ']'", tok.span)
                                .with_suggestion("Check that every '[' has a matching ']'"))
                        }
                    };
                }
                TokenKind::Comma if depth == 0 => {
                    self.push_item(&inner[item_start..i], span, &mut items)?;
                    item_start = i + 1;
                }
                _ => {}
            }
        }

        if depth != 0 {
            return Err(self
                .error_at(ErrorCode::MALFORMED_ARRAY, "unclosed '[' in array", span)
                .with_suggestion("Check that every '[' has a matching ']'"));
        }
        self.push_item(&inner[item_start..], span, &mut items)?;

        Ok(Expr::new(ExprKind::Array(items), span))
    }

    fn push_item(&self, item: &[Token], span: Span, items: &mut Vec<Expr>) -> ParseResult<()> {
        if !item.is_empty() {
            items.push(self.parse_value(item, span)?);
        }
        Ok(())
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Literals
    // ══════════════════════════════════════════════════════════════════════════

    /// Integers are literals without `.` or an exponent; everything else is a
    /// float.
    fn number_literal(&self, text: &str, negative: bool, span: Span) -> ParseResult<Expr> {
        let literal = if negative {
            format!("-{text}")
        } else {
            text.to_string()
        };

        let number = if text.contains(['.', 'e', 'E']) {
            literal.parse::<f64>().map(Number::Float).map_err(|_| {
                self.error_at(
                    ErrorCode::INVALID_EXPRESSION,
                    format!("invalid number literal '{literal}'"),
                    span,
                )
            })?
        } else {
            literal.parse::<i64>().map(Number::Int).map_err(|_| {
                self.error_at(
                    ErrorCode::INTEGER_OUT_OF_RANGE,
                    format!("integer literal '{literal}' is out of range"),
                    span,
                )
                .with_suggestion("Write it as a float, e.g. 1e20")
            })?
        };

        Ok(Expr::new(ExprKind::NumberLit(number), span))
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Errors
    // ══════════════════════════════════════════════════════════════════════════

    pub(crate) fn invalid_expression(&self, tokens: &[Token], span: Span) -> GconfError {
        let err = self.error_at(
            ErrorCode::INVALID_EXPRESSION,
            format!("invalid expression '{}'", self.text_of(tokens)),
            span,
        );
        if tokens.iter().any(|t| t.kind == TokenKind::LParen) {
            err.with_suggestion("Parentheses only appear in sqrt(x) and max(a, b)")
        } else if tokens
            .iter()
            .any(|t| matches!(t.kind, TokenKind::Plus | TokenKind::Star | TokenKind::Slash))
        {
            err.with_suggestion("Arithmetic must be wrapped in ${ ... }")
        } else {
            err
        }
    }
}
