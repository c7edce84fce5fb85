//! Token types for the Zeus lexer.
//!
//! A token is a kind plus a span into the owning file's content. Literal
//! values are not stored in the token: the parser decodes them from the
//! source slice on demand.

use super::Span;
use std::fmt;

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds for Zeus.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TokenKind {
    Eof,
    /// Statement separator. Newlines are significant.
    Newline,

    // ─── Single-byte punctuation ───
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    Colon,
    Comma,
    Dot,
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

    // ─── Ranges ───
    /// `..`
    DotDot,
    /// `...`
    DotDotDot,

    // ─── Literals and identifiers ───
    Ident,
    Int,
    Decimal,
    /// `'a'`, span includes the quotes.
    Char,
    /// `"text"`, span includes the quotes.
    Str,

    // ─── Type keywords (contiguous, see `is_type_keyword`) ───
    TyBool,
    TyF64,
    TyS64,
    TyU64,
    TyF32,
    TyS32,
    TyU32,
    TyS16,
    TyU16,
    TyChar,
    TyS8,
    TyU8,

    // ─── Other keywords ───
    Proc,
    If,
    Else,
    Struct,
    For,
    Const,
    Return,
    True,
    False,

    // ─── Pound directives ───
    /// `#import`
    PoundImport,
    /// `#stack_size`
    PoundStackSize,
}

impl TokenKind {
    /// Map a punctuation byte to its token kind.
    pub const fn from_punct(byte: u8) -> Option<TokenKind> {
        Some(match byte {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'=' => TokenKind::Eq,
            b':' => TokenKind::Colon,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'^' => TokenKind::Caret,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,
            b'!' => TokenKind::Bang,
            b'&' => TokenKind::Amp,
            b'|' => TokenKind::Pipe,
            b';' => TokenKind::Semicolon,
            b'~' => TokenKind::Tilde,
            b'?' => TokenKind::Question,
            b'@' => TokenKind::At,
            _ => return None,
        })
    }

    /// Whether this kind names a built-in type (`u8`, `s32`, `bool`, ...).
    #[inline]
    pub fn is_type_keyword(self) -> bool {
        (self as u8) >= (TokenKind::TyBool as u8) && (self as u8) <= (TokenKind::TyU8 as u8)
    }

    /// Human-readable description used in diagnostics.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of file",
            TokenKind::Newline => "newline",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Eq => "'='",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Caret => "'^'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Bang => "'!'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Semicolon => "';'",
            TokenKind::Tilde => "'~'",
            TokenKind::Question => "'?'",
            TokenKind::At => "'@'",
            TokenKind::DotDot => "'..'",
            TokenKind::DotDotDot => "'...'",
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer literal",
            TokenKind::Decimal => "decimal literal",
            TokenKind::Char => "character literal",
            TokenKind::Str => "string literal",
            TokenKind::TyBool => "'bool'",
            TokenKind::TyF64 => "'f64'",
            TokenKind::TyS64 => "'s64'",
            TokenKind::TyU64 => "'u64'",
            TokenKind::TyF32 => "'f32'",
            TokenKind::TyS32 => "'s32'",
            TokenKind::TyU32 => "'u32'",
            TokenKind::TyS16 => "'s16'",
            TokenKind::TyU16 => "'u16'",
            TokenKind::TyChar => "'char'",
            TokenKind::TyS8 => "'s8'",
            TokenKind::TyU8 => "'u8'",
            TokenKind::Proc => "'proc'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::Struct => "'struct'",
            TokenKind::For => "'for'",
            TokenKind::Const => "'const'",
            TokenKind::Return => "'return'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::PoundImport => "'#import'",
            TokenKind::PoundStackSize => "'#stack_size'",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Append-only list of tokens for one file.
///
/// The last token of a successfully lexed file is always `Eof`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Kind at `index`, or `Eof` past the end.
    #[inline]
    pub fn kind(&self, index: usize) -> TokenKind {
        self.tokens.get(index).map_or(TokenKind::Eof, |t| t.kind)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
