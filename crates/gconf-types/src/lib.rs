//! Shared types for the gconf compiler.
//!
//! This crate defines the AST node types, runtime values, the symbol table,
//! source spans and diagnostics used across all compiler stages.

mod error;
mod span;
mod symbols;
mod value;
pub mod ast;

pub use error::{CompileErrors, ErrorCategory, ErrorCode, GconfError, Severity};
pub use span::{SourceFile, Span};
pub use symbols::SymbolTable;
pub use value::{Number, Value};
