//! Core gconf lexer: converts source text to a token stream.
//!
//! Features:
//! - Line comments introduced by `%`, which win even inside quotes
//! - Newline tokens (declarations are one per line)
//! - Verbatim single-quoted strings (no escapes)
//! - Unsigned number literals in `int`, `int.frac` and `.frac` form with
//!   optional exponent; signs are left to the parser
//! - Streaming: tokens are produced on demand, so a bad character on a later
//!   line is only reported once the parser reaches that line

use gconf_types::{ErrorCode, GconfError, SourceFile, Span};

use crate::token::{Token, TokenKind};

/// Comment marker. Everything after it on the line is ignored.
pub const COMMENT_MARKER: u8 = b'%';

/// The gconf lexer.
pub struct Lexer<'src> {
    /// The full source text.
    text: &'src str,
    /// The same text as bytes, for cheap peeking.
    source: &'src [u8],
    /// Source file for error reporting.
    source_file: &'src SourceFile,
    /// Current byte offset into `source`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based, in bytes).
    col: u32,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source file.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            text: &source_file.source,
            source: source_file.source.as_bytes(),
            source_file,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Lex the entire source file into a token stream ending with
    /// [`TokenKind::Eof`], stopping at the first error.
    pub fn lex(mut self) -> Result<Vec<Token>, GconfError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// Scan the next token. Returns [`TokenKind::Eof`] repeatedly once the
    /// input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, GconfError> {
        loop {
            self.skip_whitespace();

            if self.at_end() {
                return Ok(Token::new(TokenKind::Eof, self.current_span()));
            }

            if self.peek() == Some(COMMENT_MARKER) {
                self.skip_comment();
                continue;
            }

            return self.scan_token();
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.source.get(self.pos).copied()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn span_from(&self, start_line: u32, start_col: u32) -> Span {
        Span::new(
            start_line,
            start_col,
            self.line,
            self.col.saturating_sub(1).max(1),
        )
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>, span: Span) -> GconfError {
        let source_line = self.source_file.line(span.start_line).unwrap_or("");
        GconfError::new(&self.source_file.name, code, message, span, source_line)
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    /// Skip spaces and tabs (newlines are tokens).
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if matches!(ch, b' ' | b'\t' | b'\r' | b'\x0b' | b'\x0c') {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consume a `%` comment up to, but not including, the newline.
    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == b'\n' {
                break;
            }
            self.advance();
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Token scanning
    // ─────────────────────────────────────────────────────────────

    fn scan_token(&mut self) -> Result<Token, GconfError> {
        let start_line = self.line;
        let start_col = self.col;
        let start = self.pos;

        let ch = match self.peek() {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::Eof, self.current_span())),
        };

        match ch {
            b'0'..=b'9' => return Ok(self.scan_number(start, start_line, start_col)),
            b'.' if matches!(self.peek_at(1), Some(b'0'..=b'9')) => {
                return Ok(self.scan_number(start, start_line, start_col))
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                return Ok(self.scan_identifier(start, start_line, start_col))
            }
            b'\'' => return self.scan_string(start_line, start_col),
            _ => {}
        }

        self.advance();
        let kind = match ch {
            b'\n' => TokenKind::Newline,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'=' => TokenKind::Eq,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'$' if self.peek() == Some(b'{') => {
                self.advance();
                TokenKind::DollarBrace
            }
            _ => {
                // Report the whole character, not just its first byte.
                let found = self.text[start..].chars().next().unwrap_or('?');
                let span = Span::point(start_line, start_col);
                let err = self.error(
                    ErrorCode::UNEXPECTED_CHARACTER,
                    format!("unexpected character '{found}'"),
                    span,
                );
                return Err(match found {
                    '$' => err.with_suggestion("Constant expressions are written as ${ ... }"),
                    '"' => err.with_suggestion("Strings use single quotes: 'text'"),
                    _ => err,
                });
            }
        };
        let span = if kind == TokenKind::Newline {
            Span::point(start_line, start_col)
        } else {
            self.span_from(start_line, start_col)
        };
        Ok(Token::new(kind, span))
    }

    // ─────────────────────────────────────────────────────────────
    // Number literals
    // ─────────────────────────────────────────────────────────────

    /// `\d+ | \d+\.\d* | \.\d+`, then an optional `[eE][-+]?\d+`.
    fn scan_number(&mut self, start: usize, start_line: u32, start_col: u32) -> Token {
        self.consume_digits();
        if self.peek() == Some(b'.') {
            self.advance();
            self.consume_digits();
        }

        // Only take the exponent if digits follow, so `1e` stays `1` + `e`.
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let digits_at = match self.peek_at(1) {
                Some(b'+' | b'-') => 2,
                _ => 1,
            };
            if matches!(self.peek_at(digits_at), Some(b'0'..=b'9')) {
                for _ in 0..digits_at {
                    self.advance();
                }
                self.consume_digits();
            }
        }

        let text = &self.text[start..self.pos];
        Token::new(
            TokenKind::NumberLit(text.to_string()),
            self.span_from(start_line, start_col),
        )
    }

    fn consume_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.advance();
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Identifiers & keywords
    // ─────────────────────────────────────────────────────────────

    /// `[_a-zA-Z]+`; digits never continue a name.
    fn scan_identifier(&mut self, start: usize, start_line: u32, start_col: u32) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphabetic() || ch == b'_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.text[start..self.pos];
        let kind = TokenKind::from_keyword(text)
            .unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
        Token::new(kind, self.span_from(start_line, start_col))
    }

    // ─────────────────────────────────────────────────────────────
    // String literals
    // ─────────────────────────────────────────────────────────────

    /// Scan `'...'`. Contents are taken verbatim; the string must close on
    /// the same line and before any comment marker.
    fn scan_string(&mut self, start_line: u32, start_col: u32) -> Result<Token, GconfError> {
        self.advance(); // opening quote
        let content_start = self.pos;

        loop {
            match self.peek() {
                Some(b'\'') => {
                    let content = &self.text[content_start..self.pos];
                    self.advance();
                    return Ok(Token::new(
                        TokenKind::StringLit(content.to_string()),
                        self.span_from(start_line, start_col),
                    ));
                }
                None | Some(b'\n') => {
                    let span = self.span_from(start_line, start_col);
                    return Err(self
                        .error(
                            ErrorCode::UNTERMINATED_STRING,
                            "unterminated string literal",
                            span,
                        )
                        .with_suggestion("Close the string with ' on the same line"));
                }
                Some(COMMENT_MARKER) => {
                    let span = self.span_from(start_line, start_col);
                    return Err(self
                        .error(
                            ErrorCode::UNTERMINATED_STRING,
                            "unterminated string literal (text after '%' is a comment)",
                            span,
                        )
                        .with_suggestion("Strings cannot contain '%'"));
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }
}
