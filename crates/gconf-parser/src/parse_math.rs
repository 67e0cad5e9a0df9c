//! Arithmetic sub-language inside `${ ... }`.
//!
//! The grammar is shape-driven rather than precedence-climbing. Each form is
//! tried against the whole slice, in order:
//! 1. `sqrt( X )`
//! 2. `max( X , Y )`, split at the first comma
//! 3. `L (*|/) R`, split at the first `*` or `/`
//! 4. `L (+|-) R`, split at the first `+` or `-`
//! 5. anything else is an operand, parsed as a value expression
//!
//! Because a multiplicative operator splits before an additive one and the
//! split is always at the first occurrence, `2 + 3 * 4` is `(2 + 3) * 4` and
//! `8 / 2 / 2` is `8 / (2 / 2)`. An operator in first position never splits,
//! which keeps `-3 * 2` a product of the literal `-3`.

use gconf_lexer::{Token, TokenKind};
use gconf_types::ast::{BinOp, MathExpr, MathExprKind};
use gconf_types::{ErrorCode, Span};

use crate::parser::{ParseResult, Parser};

impl<'src> Parser<'src> {
    /// Parse a token slice as an arithmetic expression.
    pub(crate) fn parse_math(&self, tokens: &[Token], outer: Span) -> ParseResult<MathExpr> {
        let span = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => first.span.to(last.span),
            _ => {
                return Err(self
                    .error_at(
                        ErrorCode::INVALID_EXPRESSION,
                        "empty constant expression",
                        outer,
                    )
                    .with_suggestion("Write a value between the braces, e.g. ${1 + 2}"))
            }
        };

        // ── Function forms ────────────────────────────────────────────────

        if let Some(arg) = call_args(tokens, "sqrt") {
            let arg = self.parse_math(arg, span)?;
            return Ok(MathExpr::new(MathExprKind::Sqrt(Box::new(arg)), span));
        }

        if let Some(args) = call_args(tokens, "max") {
            if let Some((a, _, b)) = split_first(args, |k| *k == TokenKind::Comma) {
                let a = self.parse_math(a, span)?;
                let b = self.parse_math(b, span)?;
                return Ok(MathExpr::new(
                    MathExprKind::Max(Box::new(a), Box::new(b)),
                    span,
                ));
            }
        }

        // ── Binary forms ──────────────────────────────────────────────────

        if let Some((left, op, right)) =
            split_first(tokens, |k| matches!(k, TokenKind::Star | TokenKind::Slash))
        {
            return self.binary(left, op, right, span);
        }

        if let Some((left, op, right)) =
            split_first(tokens, |k| matches!(k, TokenKind::Plus | TokenKind::Minus))
        {
            return self.binary(left, op, right, span);
        }

        // ── Operand ───────────────────────────────────────────────────────

        let operand = self.parse_value(tokens, outer)?;
        Ok(MathExpr::new(MathExprKind::Operand(operand), span))
    }

    fn binary(
        &self,
        left: &[Token],
        op: &Token,
        right: &[Token],
        span: Span,
    ) -> ParseResult<MathExpr> {
        let op = match op.kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            _ => return Err(self.invalid_expression(std::slice::from_ref(op), op.span)),
        };
        let left = self.parse_math(left, span)?;
        let right = self.parse_math(right, span)?;
        Ok(MathExpr::new(
            MathExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        ))
    }
}

/// Match `name ( args )` spanning the whole slice, with non-empty `args`.
fn call_args<'t>(tokens: &'t [Token], name: &str) -> Option<&'t [Token]> {
    match tokens {
        [callee, open, args @ .., close]
            if matches!(&callee.kind, TokenKind::Identifier(n) if n == name)
                && open.kind == TokenKind::LParen
                && close.kind == TokenKind::RParen
                && !args.is_empty() =>
        {
            Some(args)
        }
        _ => None,
    }
}

/// Split at the first token matching `is_op` that has something on both
/// sides.
fn split_first<'t>(
    tokens: &'t [Token],
    is_op: impl Fn(&TokenKind) -> bool,
) -> Option<(&'t [Token], &'t Token, &'t [Token])> {
    let last = tokens.len().checked_sub(1)?;
    (1..last)
        .find(|&i| is_op(&tokens[i].kind))
        .map(|i| (&tokens[..i], &tokens[i], &tokens[i + 1..]))
}
