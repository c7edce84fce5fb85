//! Lexer error type.
//!
//! Lexing stops at the first error; the error carries the span of the
//! offending token and what went wrong.

use std::fmt;
use zeus_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Byte that starts no token.
    InvalidCharacter,
    UnterminatedString,
    UnterminatedChar,
    /// Character literal whose body is not one byte or one escape.
    InvalidCharLiteral,
    MultipleDecimalPoints,
    /// Integer literal does not fit in `u64`.
    IntOverflow,
    /// EOF with `open` block comments still open.
    UnterminatedBlockComment { open: u32 },
    HashWithoutIdent,
    UnknownDirective,
    /// Source longer than `u32::MAX` bytes.
    FileTooLarge,
}

impl LexError {
    pub fn new(span: Span, kind: LexErrorKind) -> Self {
        LexError { span, kind }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            LexErrorKind::InvalidCharacter => "Invalid character".to_string(),
            LexErrorKind::UnterminatedString => "Expected ending double quotes".to_string(),
            LexErrorKind::UnterminatedChar => "Expected ending single quote".to_string(),
            LexErrorKind::InvalidCharLiteral => {
                "Character literal must hold one character or one escape".to_string()
            }
            LexErrorKind::MultipleDecimalPoints => {
                "Decimal cannot have two decimal points".to_string()
            }
            LexErrorKind::IntOverflow => "Integer literal does not fit in 64 bits".to_string(),
            LexErrorKind::UnterminatedBlockComment { open } => {
                format!("{open} multi line comment(s) not terminated")
            }
            LexErrorKind::HashWithoutIdent => "Expected an identifier after '#'".to_string(),
            LexErrorKind::UnknownDirective => "Unknown pound directive".to_string(),
            LexErrorKind::FileTooLarge => {
                format!("Source file exceeds {} bytes", u32::MAX)
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for LexError {}
