//! Raw token tags produced by the scanner.
//!
//! Tags carry no values. Keyword and directive lookup, literal decoding and
//! error messages belong to the cooking layer (`zeus_lexer`). Malformed
//! input is encoded as error tags rather than `Result::Err` so the scanner
//! stays allocation free.

/// Raw token kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RawTag {
    Eof,
    /// Spaces, tabs, carriage returns.
    Whitespace,
    Newline,
    /// `// ...` up to (not including) the newline.
    LineComment,
    /// `/* ... */`, nesting balanced.
    BlockComment,

    Ident,
    /// Digits and `_`.
    Int,
    /// Digits and `_` with exactly one decimal point.
    Decimal,
    /// `"..."` including both quotes.
    String,
    /// `'...'` including both quotes. The body is validated when cooked.
    Char,
    /// `#` followed by identifier characters, e.g. `#import`.
    Directive,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    Colon,
    Comma,
    Dot,
    /// `..`
    DotDot,
    /// `...`
    DotDotDot,
    Caret,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Lt,
    Gt,
    Bang,
    Amp,
    Pipe,
    Semicolon,
    Tilde,
    Question,
    At,

    // ─── Errors ───
    /// Byte that starts no token.
    InvalidByte,
    /// String reached a newline or EOF before its closing quote.
    UnterminatedString,
    /// Character literal reached a newline or EOF before its closing quote.
    UnterminatedChar,
    /// EOF inside `/* */`; `open` counts the comments still open.
    UnterminatedBlockComment { open: u32 },
    /// Number with a second decimal point.
    MultipleDecimalPoints,
    /// `#` not followed by an identifier character.
    HashWithoutIdent,
}

impl RawTag {
    /// Tokens the cooking layer drops.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            RawTag::Whitespace | RawTag::LineComment | RawTag::BlockComment
        )
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(
            self,
            RawTag::InvalidByte
                | RawTag::UnterminatedString
                | RawTag::UnterminatedChar
                | RawTag::UnterminatedBlockComment { .. }
                | RawTag::MultipleDecimalPoints
                | RawTag::HashWithoutIdent
        )
    }
}

/// A tag plus its length in bytes. The start is implied by the sum of the
/// lengths of all previous tokens.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

#[cfg(test)]
mod tests;
