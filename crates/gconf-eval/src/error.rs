//! Evaluation error types.

use gconf_types::ast::BinOp;
use gconf_types::{ErrorCode, GconfError, SourceFile, Span};
use thiserror::Error;

/// A failure while evaluating an already-parsed expression.
///
/// Every variant carries the span of the node that failed so the declaration
/// processor can attach the line and source text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A name that has not been declared (yet).
    #[error("undefined constant '{name}'")]
    UndefinedConstant { name: String, span: Span },

    /// An arithmetic operator applied to a string or an array.
    #[error("type mismatch: cannot apply '{op}' to {left} and {right}")]
    TypeMismatch {
        op: BinOp,
        left: &'static str,
        right: &'static str,
        span: Span,
    },

    /// The right operand of `/` is exactly zero.
    #[error("division by zero")]
    DivisionByZero { span: Span },

    /// `sqrt` of a negative or non-numeric value, or `max` of non-numbers.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String, span: Span },
}

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            Self::UndefinedConstant { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::DivisionByZero { span }
            | Self::InvalidArgument { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UndefinedConstant { .. } => ErrorCode::UNDEFINED_CONSTANT,
            Self::TypeMismatch { .. } => ErrorCode::TYPE_MISMATCH,
            Self::DivisionByZero { .. } => ErrorCode::DIVISION_BY_ZERO,
            Self::InvalidArgument { .. } => ErrorCode::INVALID_ARGUMENT,
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UndefinedConstant { .. } => {
                Some("Constants must be declared on an earlier line before they are used")
            }
            Self::TypeMismatch { .. } => Some("Arithmetic operators only accept numbers"),
            _ => None,
        }
    }

    /// Convert into a structured diagnostic located in `source_file`.
    pub fn into_gconf_error(self, source_file: &SourceFile) -> GconfError {
        let span = self.span();
        let source_line = source_file.line(span.start_line).unwrap_or("");
        let suggestion = self.suggestion();
        let err = GconfError::new(
            &source_file.name,
            self.code(),
            self.to_string(),
            span,
            source_line,
        );
        match suggestion {
            Some(s) => err.with_suggestion(s),
            None => err,
        }
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_categories() {
        let span = Span::point(1, 1);
        let cases = [
            (
                EvalError::UndefinedConstant {
                    name: "x".into(),
                    span,
                },
                ErrorCode::UNDEFINED_CONSTANT,
            ),
            (EvalError::DivisionByZero { span }, ErrorCode::DIVISION_BY_ZERO),
            (
                EvalError::InvalidArgument {
                    message: "m".into(),
                    span,
                },
                ErrorCode::INVALID_ARGUMENT,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_into_gconf_error_attaches_line() {
        let sf = SourceFile::new("app.gconf", "global a = 1\nglobal b = nope");
        let err = EvalError::UndefinedConstant {
            name: "nope".into(),
            span: Span::new(2, 12, 2, 15),
        }
        .into_gconf_error(&sf);
        assert_eq!(err.file, "app.gconf");
        assert_eq!(err.code, ErrorCode::UNDEFINED_CONSTANT);
        assert_eq!(err.message, "undefined constant 'nope'");
        assert_eq!(err.line(), 2);
        assert_eq!(err.source_line, "global b = nope");
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = EvalError::TypeMismatch {
            op: BinOp::Add,
            left: "string",
            right: "number",
            span: Span::point(1, 1),
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: cannot apply '+' to string and number"
        );
    }
}
