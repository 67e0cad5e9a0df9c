//! Declaration parsing: `global name = value [;]`.

use gconf_lexer::{Token, TokenKind, KEYWORD_GLOBAL};
use gconf_types::ast::{Declaration, Ident};
use gconf_types::{ErrorCode, Span};

use crate::parser::{ParseResult, Parser};

impl<'src> Parser<'src> {
    /// Parse one non-empty line of tokens as a declaration.
    pub(crate) fn parse_declaration(&self, line: &[Token]) -> ParseResult<Declaration> {
        let line_span = match (line.first(), line.last()) {
            (Some(first), Some(last)) => first.span.to(last.span),
            _ => Span::point(1, 1),
        };

        let invalid = || {
            self.error_at(
                ErrorCode::INVALID_DECLARATION,
                "invalid syntax, expected 'global name = value'",
                line_span,
            )
            .with_suggestion("Declare constants as: global name = value;")
        };

        let (name, eq, rest) = match line {
            [kw, name, eq, rest @ ..] if kw.kind == TokenKind::Global && eq.kind == TokenKind::Eq => {
                (name, eq, rest)
            }
            _ => return Err(invalid()),
        };

        let name = match &name.kind {
            TokenKind::Identifier(n) => Ident::new(n.clone(), name.span),
            // `[_a-zA-Z]+` admits the keyword itself as a name.
            TokenKind::Global => Ident::new(KEYWORD_GLOBAL, name.span),
            _ => return Err(invalid()),
        };

        if rest.is_empty() {
            return Err(invalid());
        }

        // One trailing `;` is allowed.
        let value = match rest {
            [value @ .., semi] if semi.kind == TokenKind::Semicolon => value,
            _ => rest,
        };
        let value = self.parse_value(value, eq.span)?;

        Ok(Declaration {
            name,
            value,
            span: line_span,
        })
    }
}
