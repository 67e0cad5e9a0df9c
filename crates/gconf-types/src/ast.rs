//! AST node types for the gconf language.
//!
//! Every node carries a [`Span`] for error reporting.
//! Two expression grammars exist: value expressions ([`Expr`]) and the
//! arithmetic sub-language inside `${ ... }` ([`MathExpr`]).

use crate::{Number, Span};
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete source file: declarations in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

/// `global name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Value Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `${ ... }`
    Constant(Box<MathExpr>),
    /// `[a, b, ...]`
    Array(Vec<Expr>),
    /// `'text'`
    StringLit(String),
    /// `42`, `-1.5e3`
    NumberLit(Number),
    /// Reference to a previously declared constant.
    Identifier(String),
}

// ══════════════════════════════════════════════════════════════════════════════
// Arithmetic Sub-language
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct MathExpr {
    pub kind: MathExprKind,
    pub span: Span,
}

impl MathExpr {
    pub fn new(kind: MathExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MathExprKind {
    /// `sqrt(x)`
    Sqrt(Box<MathExpr>),
    /// `max(a, b)`
    Max(Box<MathExpr>, Box<MathExpr>),
    Binary {
        left: Box<MathExpr>,
        op: BinOp,
        right: Box<MathExpr>,
    },
    /// Any operand outside the arithmetic grammar, resolved as a value
    /// expression.
    Operand(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }

    /// `*` and `/` split before `+` and `-`.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, BinOp::Mul | BinOp::Div)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
