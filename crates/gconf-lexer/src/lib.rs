//! gconf lexer: converts source text into a token stream.

pub mod lexer;
pub mod token;

pub use lexer::{Lexer, COMMENT_MARKER};
pub use token::{Token, TokenKind, KEYWORD_GLOBAL};
