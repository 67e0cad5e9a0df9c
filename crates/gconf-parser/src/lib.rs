//! gconf parser: converts a token stream into an AST.
//!
//! [`Parser`] reads one declaration per source line. The free functions parse
//! standalone expressions, which is what the evaluator helpers and the tests
//! use.

mod parse_decl;
mod parse_expr;
mod parse_math;
mod parser;

pub use parser::{ParseResult, Parser};

use gconf_types::ast::{Expr, MathExpr};
use gconf_types::SourceFile;

/// Parse a standalone value expression such as `[1, ${x * 2}]`.
pub fn parse_expression(source: &str) -> ParseResult<Expr> {
    let sf = SourceFile::new("<expr>", source);
    Parser::new(&sf).parse_expression()
}

/// Parse the body of a constant expression, e.g. `sqrt(x) + 1`.
pub fn parse_math_expression(source: &str) -> ParseResult<MathExpr> {
    let sf = SourceFile::new("<expr>", source);
    Parser::new(&sf).parse_math_expression()
}
