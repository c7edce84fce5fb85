//! Parse error type.
//!
//! Parsing stops at the first error. The error carries its diagnostic code
//! so the driver can convert it without re-classifying the message.

use std::fmt;
use zeus_diagnostic::ErrorCode;
use zeus_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
        }
    }

    /// `N` unclosed `(` at the end of an expression.
    #[cold]
    pub fn missing_close_parens(count: u32, span: Span) -> Self {
        let plural = if count == 1 { "" } else { "s" };
        ParseError::new(
            ErrorCode::E2003,
            format!("Expected {count} closing bracket{plural} in this expression"),
            span,
        )
    }

    #[cold]
    pub fn stray_close_paren(span: Span) -> Self {
        ParseError::new(
            ErrorCode::E2003,
            "No opening bracket to match this closing bracket",
            span,
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ParseError {}
