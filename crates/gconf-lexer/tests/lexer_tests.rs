//! Lexer tests: literals, names, punctuation, comments, newline handling,
//! error reporting and streaming behaviour.

use gconf_lexer::{Lexer, TokenKind};
use gconf_types::{ErrorCode, SourceFile, Span};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Lex source text and return just the token kinds (excluding final Eof).
fn kinds(source: &str) -> Vec<TokenKind> {
    let sf = SourceFile::new("test.gconf", source);
    Lexer::new(&sf)
        .lex()
        .expect("lexing should succeed")
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.kind)
        .collect()
}

/// Lex and return the error code.
fn error_code(source: &str) -> ErrorCode {
    let sf = SourceFile::new("test.gconf", source);
    Lexer::new(&sf).lex().expect_err("lexing should fail").code
}

fn num(s: &str) -> TokenKind {
    TokenKind::NumberLit(s.to_string())
}

fn ident(s: &str) -> TokenKind {
    TokenKind::Identifier(s.to_string())
}

// ─────────────────────────────────────────────────────────────────────
// Declarations
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_simple_declaration() {
    assert_eq!(
        kinds("global width = 10;"),
        vec![
            TokenKind::Global,
            ident("width"),
            TokenKind::Eq,
            num("10"),
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_global_prefix_is_an_identifier() {
    assert_eq!(kinds("globals"), vec![ident("globals")]);
    assert_eq!(kinds("_global"), vec![ident("_global")]);
}

#[test]
fn test_identifiers_exclude_digits() {
    assert_eq!(kinds("abc1"), vec![ident("abc"), num("1")]);
    assert_eq!(kinds("snake_case_Name"), vec![ident("snake_case_Name")]);
}

// ─────────────────────────────────────────────────────────────────────
// Numbers
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_number_forms() {
    for src in ["0", "42", "007", "3.", "3.14", ".5", "1e10", "1E+3", "2.5e-3", "1.e5"] {
        assert_eq!(kinds(src), vec![num(src)], "literal '{src}'");
    }
}

#[test]
fn test_minus_is_separate_from_number() {
    assert_eq!(kinds("-3"), vec![TokenKind::Minus, num("3")]);
}

#[test]
fn test_dangling_exponent_is_not_consumed() {
    assert_eq!(kinds("1e"), vec![num("1"), ident("e")]);
    assert_eq!(kinds("1e+"), vec![num("1"), ident("e"), TokenKind::Plus]);
}

#[test]
fn test_double_dot_splits_numbers() {
    assert_eq!(kinds("1.2.3"), vec![num("1.2"), num(".3")]);
}

// ─────────────────────────────────────────────────────────────────────
// Strings
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_string_verbatim() {
    assert_eq!(
        kinds(r"'a, [b] \n ${c}'"),
        vec![TokenKind::StringLit(r"a, [b] \n ${c}".to_string())]
    );
    assert_eq!(kinds("''"), vec![TokenKind::StringLit(String::new())]);
}

#[test]
fn test_string_unicode() {
    assert_eq!(
        kinds("'привет мир'"),
        vec![TokenKind::StringLit("привет мир".to_string())]
    );
}

#[test]
fn test_unterminated_string() {
    assert_eq!(error_code("'abc"), ErrorCode::UNTERMINATED_STRING);
    assert_eq!(error_code("'abc\n'"), ErrorCode::UNTERMINATED_STRING);
}

#[test]
fn test_comment_marker_ends_string() {
    assert_eq!(error_code("'50% off'"), ErrorCode::UNTERMINATED_STRING);
}

// ─────────────────────────────────────────────────────────────────────
// Punctuation & operators
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_constant_expression_wrapper() {
    assert_eq!(
        kinds("${max(a, 2) * 3}"),
        vec![
            TokenKind::DollarBrace,
            ident("max"),
            TokenKind::LParen,
            ident("a"),
            TokenKind::Comma,
            num("2"),
            TokenKind::RParen,
            TokenKind::Star,
            num("3"),
            TokenKind::RBrace,
        ]
    );
}

#[test]
fn test_operators_and_brackets() {
    assert_eq!(
        kinds("[1+2-3*4/5]"),
        vec![
            TokenKind::LBracket,
            num("1"),
            TokenKind::Plus,
            num("2"),
            TokenKind::Minus,
            num("3"),
            TokenKind::Star,
            num("4"),
            TokenKind::Slash,
            num("5"),
            TokenKind::RBracket,
        ]
    );
}

#[test]
fn test_unexpected_characters() {
    assert_eq!(error_code("#"), ErrorCode::UNEXPECTED_CHARACTER);
    assert_eq!(error_code("$x"), ErrorCode::UNEXPECTED_CHARACTER);
    assert_eq!(error_code("{"), ErrorCode::UNEXPECTED_CHARACTER);
    assert_eq!(error_code("\"text\""), ErrorCode::UNEXPECTED_CHARACTER);
    assert_eq!(error_code("é"), ErrorCode::UNEXPECTED_CHARACTER);
}

#[test]
fn test_unexpected_character_message_and_span() {
    let sf = SourceFile::new("test.gconf", "global x = 1 # 2");
    let err = Lexer::new(&sf).lex().unwrap_err();
    assert_eq!(err.message, "unexpected character '#'");
    assert_eq!(err.span, Span::point(1, 14));
    assert_eq!(err.source_line, "global x = 1 # 2");
}

// ─────────────────────────────────────────────────────────────────────
// Comments & newlines
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_comment_runs_to_end_of_line() {
    assert_eq!(
        kinds("global a = 1 % trailing # anything\nglobal b = 2"),
        vec![
            TokenKind::Global,
            ident("a"),
            TokenKind::Eq,
            num("1"),
            TokenKind::Newline,
            TokenKind::Global,
            ident("b"),
            TokenKind::Eq,
            num("2"),
        ]
    );
}

#[test]
fn test_blank_and_comment_lines_yield_newlines_only() {
    assert_eq!(
        kinds("\n% header\n   \n"),
        vec![TokenKind::Newline, TokenKind::Newline, TokenKind::Newline]
    );
}

#[test]
fn test_crlf_line_endings() {
    assert_eq!(
        kinds("global a = 1\r\nglobal b = 2\r\n"),
        vec![
            TokenKind::Global,
            ident("a"),
            TokenKind::Eq,
            num("1"),
            TokenKind::Newline,
            TokenKind::Global,
            ident("b"),
            TokenKind::Eq,
            num("2"),
            TokenKind::Newline,
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Spans & streaming
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_token_spans() {
    let sf = SourceFile::new("test.gconf", "global pi = 3.14\nglobal s = 'x'");
    let tokens = Lexer::new(&sf).lex().unwrap();
    assert_eq!(tokens[1].span, Span::new(1, 8, 1, 9));
    assert_eq!(tokens[3].span, Span::new(1, 13, 1, 16));
    assert_eq!(tokens[4].kind, TokenKind::Newline);
    assert_eq!(tokens[4].span, Span::point(1, 17));
    assert_eq!(tokens[8].span, Span::new(2, 12, 2, 14));
}

#[test]
fn test_streaming_reports_errors_lazily() {
    let sf = SourceFile::new("test.gconf", "global a = 1\nglobal b = #");
    let mut lexer = Lexer::new(&sf);
    let mut seen = Vec::new();
    loop {
        match lexer.next_token() {
            Ok(tok) => {
                let stop = tok.kind == TokenKind::Newline;
                seen.push(tok.kind);
                if stop {
                    break;
                }
            }
            Err(e) => panic!("first line should lex cleanly: {e}"),
        }
    }
    assert_eq!(seen.len(), 5);
    let err = loop {
        match lexer.next_token() {
            Ok(_) => continue,
            Err(e) => break e,
        }
    };
    assert_eq!(err.span.start_line, 2);
}

#[test]
fn test_eof_is_sticky() {
    let sf = SourceFile::new("test.gconf", "x");
    let mut lexer = Lexer::new(&sf);
    assert_eq!(lexer.next_token().unwrap().kind, ident("x"));
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_lexer_determinism_100_iterations() {
    let source = "global a = [1, 'two', ${sqrt(9) + 1}]\n% c\nglobal b = a";
    let first = kinds(source);
    for i in 0..100 {
        assert_eq!(kinds(source), first, "Determinism failure at iteration {i}");
    }
}
