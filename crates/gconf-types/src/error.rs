use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Whether a diagnostic stops compilation.
///
/// Only redeclaration is reported as a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Broad class of a diagnostic; each owns one hundred codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Syntax,
    Scope,
    Type,
    Arithmetic,
    Declaration,
    Output,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Scope => "scope",
            Self::Type => "type",
            Self::Arithmetic => "arithmetic",
            Self::Declaration => "declaration",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric diagnostic code, shown as `E<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // Syntax
    pub const UNEXPECTED_CHARACTER: Self = Self(100);
    pub const UNTERMINATED_STRING: Self = Self(101);
    pub const INVALID_DECLARATION: Self = Self(102);
    pub const INVALID_EXPRESSION: Self = Self(103);
    pub const MALFORMED_ARRAY: Self = Self(104);
    pub const INTEGER_OUT_OF_RANGE: Self = Self(105);

    // Scope
    pub const UNDEFINED_CONSTANT: Self = Self(200);

    // Type
    pub const TYPE_MISMATCH: Self = Self(300);

    // Arithmetic
    pub const DIVISION_BY_ZERO: Self = Self(400);
    pub const INVALID_ARGUMENT: Self = Self(401);

    // Declaration
    pub const CONSTANT_REDECLARED: Self = Self(500);

    // Output
    pub const OUTPUT_FAILED: Self = Self(600);

    /// The category owning this code's hundred. Codes outside E100..E699
    /// are never produced and count as syntax.
    pub fn category(self) -> ErrorCategory {
        match self.0 / 100 {
            2 => ErrorCategory::Scope,
            3 => ErrorCategory::Type,
            4 => ErrorCategory::Arithmetic,
            5 => ErrorCategory::Declaration,
            6 => ErrorCategory::Output,
            _ => ErrorCategory::Syntax,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A positioned diagnostic, ready to render or serialize.
///
/// `Display` gives `line:col: Ecode [category] message`; callers prefix the
/// file name and append the suggestion as they see fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{span}: {code} [{category}] {message}")]
pub struct GconfError {
    pub file: String,
    pub code: ErrorCode,
    pub severity: Severity,
    /// Always `code.category()`; stored so serialized output is self-describing.
    pub category: ErrorCategory,
    pub message: String,
    #[serde(flatten)]
    pub span: Span,
    /// The full text of the offending line.
    pub source_line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl GconfError {
    pub fn new(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            code,
            severity: Severity::Error,
            category: code.category(),
            message: message.into(),
            span,
            source_line: source_line.into(),
            suggestion: None,
        }
    }

    /// Same as [`GconfError::new`] with [`Severity::Warning`].
    pub fn warning(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        source_line: impl Into<String>,
    ) -> Self {
        let mut diagnostic = Self::new(file, code, message, span, source_line);
        diagnostic.severity = Severity::Warning;
        diagnostic
    }

    pub fn with_suggestion(self, suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: Some(suggestion.into()),
            ..self
        }
    }

    pub fn line(&self) -> u32 {
        self.span.start_line
    }
}

/// Diagnostics collected from one compilation.
///
/// Compilation stops at the first error, so `errors` holds at most one
/// entry; warnings accumulate up to that point. The totals are kept
/// alongside the lists for consumers of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompileErrors {
    pub errors: Vec<GconfError>,
    pub warnings: Vec<GconfError>,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl CompileErrors {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn push_error(&mut self, error: GconfError) {
        self.errors.push(error);
        self.total_errors = self.errors.len();
    }

    pub fn push_warning(&mut self, warning: GconfError) {
        self.warnings.push(warning);
        self.total_warnings = self.warnings.len();
    }

    pub fn first_error(&self) -> Option<&GconfError> {
        self.errors.first()
    }
}
