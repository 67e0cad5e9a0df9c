//! Token types for the gconf lexer.
//!
//! Defines [`TokenKind`] covering every lexeme of the language and
//! [`Token`], which pairs a kind with a source [`Span`].

use gconf_types::Span;
use std::fmt;

/// The only reserved word.
pub const KEYWORD_GLOBAL: &str = "global";

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the gconf lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the gconf language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────

    /// Unsigned numeric literal, kept as written: `42`, `3.`, `.5`, `1e-3`.
    /// The parser decides between integer and float and applies a sign.
    NumberLit(String),
    /// Single-quoted string, contents verbatim: `'hello'`
    StringLit(String),

    // ── Names ────────────────────────────────────────────────

    /// `[_a-zA-Z]+`
    Identifier(String),
    /// `global`
    Global,

    // ── Operators ────────────────────────────────────────────

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `=`
    Eq,

    // ── Punctuation ──────────────────────────────────────────

    /// `${` (opens a constant expression)
    DollarBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,

    // ── Layout ───────────────────────────────────────────────

    /// End of a source line. Declarations are newline-terminated.
    Newline,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Map an identifier-shaped word to its keyword, if it is one.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        match s {
            KEYWORD_GLOBAL => Some(TokenKind::Global),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::NumberLit(n) => write!(f, "{n}"),
            TokenKind::StringLit(s) => write!(f, "'{s}'"),
            TokenKind::Identifier(name) => write!(f, "{name}"),
            TokenKind::Global => write!(f, "{KEYWORD_GLOBAL}"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::DollarBrace => write!(f, "${{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}
