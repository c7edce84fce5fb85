//! Error codes for all compiler diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2003`) with the first digit
//! indicating the compiler phase.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Lexer errors
/// - E2xxx: Parser errors
/// - E3xxx: Checker errors
/// - E9xxx: Driver and internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E1xxx)
    /// Byte that starts no token
    E1001,
    /// Unterminated string literal
    E1002,
    /// Unterminated character literal
    E1003,
    /// Malformed number literal
    E1004,
    /// Unterminated block comment
    E1005,
    /// `#` not followed by an identifier
    E1006,
    /// Unknown pound directive
    E1007,
    /// Malformed character literal body
    E1008,

    // Parser Errors (E2xxx)
    /// Unexpected token
    E2001,
    /// Expected expression
    E2002,
    /// Unbalanced delimiter
    E2003,
    /// Expected identifier
    E2004,
    /// Expected type
    E2005,
    /// Expected a body
    E2006,
    /// `else` without `if`
    E2007,
    /// Malformed directive
    E2008,

    // Checker Errors (E3xxx)
    /// Name does not resolve
    E3001,
    /// Name declared twice in one scope
    E3002,
    /// Type or pointer depth mismatch
    E3003,
    /// Invalid operands for a binary operator
    E3004,
    /// Field not found in structure
    E3005,
    /// Count mismatch between values and slots
    E3006,
    /// Statement not allowed in this position
    E3007,
    /// Invalid global declaration
    E3008,
    /// Invalid structure body
    E3009,
    /// Invalid loop header
    E3010,
    /// Invalid pointer access
    E3011,

    // Driver and Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,
    /// Too many errors
    E9002,
    /// File could not be read or written
    E9003,
    /// Import could not be resolved
    E9004,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
            ErrorCode::E3010 => "E3010",
            ErrorCode::E3011 => "E3011",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::E9003 => "E9003",
            ErrorCode::E9004 => "E9004",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    pub fn is_checker_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
