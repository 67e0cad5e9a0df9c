//! gconf evaluator: turns parsed declarations into values.
//!
//! [`Evaluator`] resolves a single expression against a read-only
//! [`SymbolTable`]; [`DeclarationProcessor`] drives the parser line by line
//! and owns the table. [`evaluate`] and [`evaluate_math`] are shortcuts that
//! parse and evaluate a standalone expression.

pub mod error;
pub mod evaluator;
pub mod processor;

pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use processor::DeclarationProcessor;

use gconf_parser::Parser;
use gconf_types::{GconfError, SourceFile, SymbolTable, Value};

/// Evaluate a value expression such as `[1, ${x * 2}]`.
pub fn evaluate(expr: &str, symbols: &SymbolTable) -> Result<Value, GconfError> {
    let sf = SourceFile::new("<expr>", expr);
    let parsed = Parser::new(&sf).parse_expression()?;
    Evaluator::new(symbols)
        .eval_expr(&parsed)
        .map_err(|e| e.into_gconf_error(&sf))
}

/// Evaluate the body of a constant expression, e.g. `sqrt(x) + 1`.
pub fn evaluate_math(expr: &str, symbols: &SymbolTable) -> Result<Value, GconfError> {
    let sf = SourceFile::new("<expr>", expr);
    let parsed = Parser::new(&sf).parse_math_expression()?;
    Evaluator::new(symbols)
        .eval_math(&parsed)
        .map_err(|e| e.into_gconf_error(&sf))
}
