//! Expression and arithmetic evaluation.

use gconf_types::ast::*;
use gconf_types::{Number, Span, SymbolTable, Value};
use tracing::trace;

use crate::error::{EvalError, EvalResult};

/// Walks expression trees against a read-only symbol table.
///
/// The table holds only fully evaluated values, so identifier lookup is a
/// plain fetch with no re-evaluation.
pub struct Evaluator<'a> {
    symbols: &'a SymbolTable,
}

impl<'a> Evaluator<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Value expressions
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate a value expression.
    pub fn eval_expr(&self, expr: &Expr) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::Constant(math) => self.eval_math(math),
            ExprKind::Array(items) => items
                .iter()
                .map(|item| self.eval_expr(item))
                .collect::<EvalResult<Vec<_>>>()
                .map(Value::Array),
            ExprKind::StringLit(s) => Ok(Value::String(s.clone())),
            ExprKind::NumberLit(n) => Ok(Value::Number(*n)),
            ExprKind::Identifier(name) => self.eval_identifier(name, expr.span),
        }
    }

    fn eval_identifier(&self, name: &str, span: Span) -> EvalResult<Value> {
        self.symbols
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedConstant {
                name: name.to_string(),
                span,
            })
    }

    // ══════════════════════════════════════════════════════════════════════
    // Arithmetic
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate the body of a `${ ... }` expression.
    ///
    /// A bare operand evaluates to whatever it denotes, so `${'a'}` is the
    /// string `a`. Operators and functions require numbers.
    pub fn eval_math(&self, math: &MathExpr) -> EvalResult<Value> {
        let value = match &math.kind {
            MathExprKind::Operand(expr) => return self.eval_expr(expr),
            MathExprKind::Sqrt(arg) => self.eval_sqrt(arg, math.span)?,
            MathExprKind::Max(a, b) => self.eval_max(a, b, math.span)?,
            MathExprKind::Binary { left, op, right } => {
                self.eval_binary(left, *op, right, math.span)?
            }
        };
        trace!(span = %math.span, result = %value, "evaluated arithmetic");
        Ok(Value::Number(value))
    }

    fn eval_sqrt(&self, arg: &MathExpr, span: Span) -> EvalResult<Number> {
        let value = self.eval_math(arg)?;
        match value.as_number() {
            Some(n) if n.as_f64() >= 0.0 => Ok(Number::Float(n.as_f64().sqrt())),
            Some(n) => Err(EvalError::InvalidArgument {
                message: format!("sqrt of negative number {n}"),
                span,
            }),
            None => Err(EvalError::InvalidArgument {
                message: format!("sqrt expects a number, got {}", value.type_name()),
                span,
            }),
        }
    }

    /// The first operand wins unless the second is strictly greater; the
    /// winner keeps its integer or float form.
    fn eval_max(&self, a: &MathExpr, b: &MathExpr, span: Span) -> EvalResult<Number> {
        let a = self.eval_math(a)?;
        let b = self.eval_math(b)?;
        match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => Ok(if y.gt(x) { y } else { x }),
            _ => Err(EvalError::InvalidArgument {
                message: format!(
                    "max expects two numbers, got {} and {}",
                    a.type_name(),
                    b.type_name()
                ),
                span,
            }),
        }
    }

    fn eval_binary(
        &self,
        left: &MathExpr,
        op: BinOp,
        right: &MathExpr,
        span: Span,
    ) -> EvalResult<Number> {
        let lv = self.eval_math(left)?;
        let rv = self.eval_math(right)?;
        let (a, b) = match (lv.as_number(), rv.as_number()) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(EvalError::TypeMismatch {
                    op,
                    left: lv.type_name(),
                    right: rv.type_name(),
                    span,
                })
            }
        };

        if op == BinOp::Div && b.is_zero() {
            return Err(EvalError::DivisionByZero { span });
        }
        Ok(apply(op, a, b))
    }
}

/// Integer operands stay integers for `+ - *` unless the result overflows;
/// `/` is always true division.
fn apply(op: BinOp, a: Number, b: Number) -> Number {
    if let (Number::Int(x), Number::Int(y)) = (a, b) {
        let exact = match op {
            BinOp::Add => x.checked_add(y),
            BinOp::Sub => x.checked_sub(y),
            BinOp::Mul => x.checked_mul(y),
            BinOp::Div => None,
        };
        if let Some(n) = exact {
            return Number::Int(n);
        }
    }

    let (x, y) = (a.as_f64(), b.as_f64());
    Number::Float(match op {
        BinOp::Add => x + y,
        BinOp::Sub => x - y,
        BinOp::Mul => x * y,
        BinOp::Div => x / y,
    })
}
