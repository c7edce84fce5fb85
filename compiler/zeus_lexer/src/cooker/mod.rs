//! Token cooking layer.
//!
//! ```text
//! source -> RawScanner -> (RawTag, len) -> TokenCooker -> TokenKind
//! ```
//!
//! - **Punctuation**: direct 1:1 mapping
//! - **Identifiers**: keyword lookup
//! - **Directives**: directive table lookup
//! - **Literals**: validated (integer range, character body) but not stored
//! - **Trivia**: dropped
//! - **Error tags**: turned into a [`LexError`]

use zeus_ir::{Span, TokenKind};
use zeus_lexer_core::RawTag;

use crate::keywords;
use crate::lex_error::{LexError, LexErrorKind};
use crate::literal;

pub(crate) struct TokenCooker<'src> {
    source: &'src str,
}

impl<'src> TokenCooker<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self { source }
    }

    fn text(&self, span: Span) -> &'src str {
        self.source.get(span.to_range()).unwrap_or("")
    }

    /// Cook one raw token. `Ok(None)` for trivia.
    pub(crate) fn cook(&self, tag: RawTag, span: Span) -> Result<Option<TokenKind>, LexError> {
        let kind = match tag {
            RawTag::Whitespace | RawTag::LineComment | RawTag::BlockComment => return Ok(None),
            RawTag::Eof => TokenKind::Eof,
            RawTag::Newline => TokenKind::Newline,

            RawTag::Ident => {
                keywords::lookup(self.text(span)).unwrap_or(TokenKind::Ident)
            }
            RawTag::Directive => {
                let name = self.text(span).trim_start_matches('#');
                keywords::lookup_directive(name)
                    .ok_or_else(|| LexError::new(span, LexErrorKind::UnknownDirective))?
            }
            RawTag::Int => {
                if literal::parse_int(self.text(span)).is_none() {
                    return Err(LexError::new(span, LexErrorKind::IntOverflow));
                }
                TokenKind::Int
            }
            RawTag::Decimal => TokenKind::Decimal,
            RawTag::String => TokenKind::Str,
            RawTag::Char => {
                let body = literal::quoted_body(self.text(span));
                if literal::decode_char(body).is_none() {
                    return Err(LexError::new(span, LexErrorKind::InvalidCharLiteral));
                }
                TokenKind::Char
            }

            RawTag::Plus => TokenKind::Plus,
            RawTag::Minus => TokenKind::Minus,
            RawTag::Star => TokenKind::Star,
            RawTag::Slash => TokenKind::Slash,
            RawTag::Percent => TokenKind::Percent,
            RawTag::Eq => TokenKind::Eq,
            RawTag::Colon => TokenKind::Colon,
            RawTag::Comma => TokenKind::Comma,
            RawTag::Dot => TokenKind::Dot,
            RawTag::DotDot => TokenKind::DotDot,
            RawTag::DotDotDot => TokenKind::DotDotDot,
            RawTag::Caret => TokenKind::Caret,
            RawTag::LParen => TokenKind::LParen,
            RawTag::RParen => TokenKind::RParen,
            RawTag::LBrace => TokenKind::LBrace,
            RawTag::RBrace => TokenKind::RBrace,
            RawTag::LBracket => TokenKind::LBracket,
            RawTag::RBracket => TokenKind::RBracket,
            RawTag::Lt => TokenKind::Lt,
            RawTag::Gt => TokenKind::Gt,
            RawTag::Bang => TokenKind::Bang,
            RawTag::Amp => TokenKind::Amp,
            RawTag::Pipe => TokenKind::Pipe,
            RawTag::Semicolon => TokenKind::Semicolon,
            RawTag::Tilde => TokenKind::Tilde,
            RawTag::Question => TokenKind::Question,
            RawTag::At => TokenKind::At,

            RawTag::InvalidByte => return Err(LexError::new(span, LexErrorKind::InvalidCharacter)),
            RawTag::UnterminatedString => {
                return Err(LexError::new(span, LexErrorKind::UnterminatedString))
            }
            RawTag::UnterminatedChar => {
                return Err(LexError::new(span, LexErrorKind::UnterminatedChar))
            }
            RawTag::UnterminatedBlockComment { open } => {
                return Err(LexError::new(
                    span,
                    LexErrorKind::UnterminatedBlockComment { open },
                ))
            }
            RawTag::MultipleDecimalPoints => {
                return Err(LexError::new(span, LexErrorKind::MultipleDecimalPoints))
            }
            RawTag::HashWithoutIdent => {
                return Err(LexError::new(span, LexErrorKind::HashWithoutIdent))
            }
        };
        Ok(Some(kind))
    }
}

#[cfg(test)]
mod tests;
