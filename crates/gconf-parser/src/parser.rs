//! Core parser infrastructure: line cursor over the lexer, error helpers.

use gconf_lexer::{Lexer, Token, TokenKind};
use gconf_types::ast::{Declaration, Expr, MathExpr, Program};
use gconf_types::{ErrorCode, GconfError, SourceFile, Span};

/// Result of a parsing step. Parsing stops at the first error.
pub type ParseResult<T> = Result<T, GconfError>;

/// The gconf parser.
///
/// Pulls tokens from the lexer one line at a time and turns each non-blank
/// line into a [`Declaration`]. Lines are only read when the previous
/// declaration has been handed out, so a caller that evaluates as it goes
/// sees errors in source order.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    /// Source file for error context.
    source_file: &'src SourceFile,
    /// Set once the input is exhausted or an error was returned.
    finished: bool,
}

impl<'src> Parser<'src> {
    /// Create a new parser over a source file.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            lexer: Lexer::new(source_file),
            source_file,
            finished: false,
        }
    }

    // ── Line Cursor ───────────────────────────────────────────────────────────

    /// Collect the tokens of the next non-blank line, without its newline.
    /// Returns `None` at end of input.
    fn next_line(&mut self) -> ParseResult<Option<Vec<Token>>> {
        let mut line = Vec::new();
        loop {
            let token = self.lexer.next_token()?;
            match token.kind {
                TokenKind::Newline if line.is_empty() => continue,
                TokenKind::Newline => return Ok(Some(line)),
                TokenKind::Eof if line.is_empty() => return Ok(None),
                TokenKind::Eof => return Ok(Some(line)),
                _ => line.push(token),
            }
        }
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    /// Build an error at a specific span.
    pub(crate) fn error_at(
        &self,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
    ) -> GconfError {
        let source_line = self.source_file.line(span.start_line).unwrap_or("");
        GconfError::new(&self.source_file.name, code, message, span, source_line)
    }

    /// The source text behind a token slice, for messages.
    pub(crate) fn text_of(&self, tokens: &[Token]) -> String {
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return String::new();
        };
        match self.source_file.snippet(first.span.to(last.span)) {
            Some(text) => text.to_string(),
            None => tokens
                .iter()
                .map(|t| t.kind.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the next declaration, or `None` once the input is exhausted.
    /// After an error is returned the parser yields nothing further.
    pub fn next_declaration(&mut self) -> Option<ParseResult<Declaration>> {
        if self.finished {
            return None;
        }
        let result = match self.next_line() {
            Ok(Some(line)) => self.parse_declaration(&line),
            Ok(None) => {
                self.finished = true;
                return None;
            }
            Err(e) => Err(e),
        };
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }

    /// Parse every declaration into a [`Program`].
    pub fn parse(self) -> ParseResult<Program> {
        let declarations = self.collect::<ParseResult<Vec<_>>>()?;
        Ok(Program { declarations })
    }

    /// Parse the whole source as a single value expression.
    pub fn parse_expression(mut self) -> ParseResult<Expr> {
        let tokens = self.single_line()?;
        self.parse_value(&tokens, Span::point(1, 1))
    }

    /// Parse the whole source as an arithmetic expression, i.e. the text that
    /// would appear between `${` and `}`.
    pub fn parse_math_expression(mut self) -> ParseResult<MathExpr> {
        let tokens = self.single_line()?;
        self.parse_math(&tokens, Span::point(1, 1))
    }

    fn single_line(&mut self) -> ParseResult<Vec<Token>> {
        let tokens = self.next_line()?.unwrap_or_default();
        if let Some(extra) = self.next_line()? {
            let span = extra.first().map_or(Span::point(1, 1), |t| t.span);
            return Err(self.error_at(
                ErrorCode::INVALID_EXPRESSION,
                "an expression must fit on a single line",
                span,
            ));
        }
        Ok(tokens)
    }
}

impl Iterator for Parser<'_> {
    type Item = ParseResult<Declaration>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_declaration()
    }
}
