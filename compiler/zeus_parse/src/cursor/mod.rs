//! Token cursor for navigating the token stream.
//!
//! Provides token access, lookahead and consumption. The last token of the
//! list is always `Eof`, so lookahead past the end reads `Eof`.

use super::ParseError;
use tracing::trace;
use zeus_diagnostic::ErrorCode;
use zeus_ir::{Name, Span, StringInterner, Token, TokenKind, TokenList};

pub struct Cursor<'a> {
    tokens: &'a TokenList,
    source: &'a str,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, source: &'a str, interner: &'a StringInterner) -> Self {
        Cursor {
            tokens,
            source,
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Current position, for snapshots.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos <= self.tokens.len(),
            "cursor position {pos} out of bounds"
        );
        self.pos = pos;
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.token_at(self.pos)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.tokens.kind(self.pos)
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.token_at(self.pos - 1).span
        } else {
            Span::DUMMY
        }
    }

    /// Kind `n` tokens ahead. `peek_kind_at(0)` is the current token.
    #[inline]
    pub fn peek_kind_at(&self, n: usize) -> TokenKind {
        self.tokens.kind(self.pos + n)
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume and return the current token. Never moves past `Eof`.
    #[inline]
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        trace!(
            pos = self.pos,
            kind = token.kind.display_name(),
            span = %token.span,
            "advance"
        );
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    #[inline]
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Source text of a token.
    #[inline]
    pub fn text(&self, token: Token) -> &'a str {
        self.source.get(token.span.to_range()).unwrap_or("")
    }

    /// Expect the current token to be `kind`, or fail with `message`.
    #[inline]
    pub fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(ErrorCode::E2001, message))
        }
    }

    /// Consume an identifier and intern it.
    pub fn expect_ident(&mut self, message: &str) -> Result<(Name, Span), ParseError> {
        if self.check(TokenKind::Ident) {
            let token = self.advance();
            Ok((self.interner.intern(self.text(token)), token.span))
        } else {
            Err(self.error(ErrorCode::E2004, message))
        }
    }

    /// Error anchored at the current token.
    #[cold]
    #[inline(never)]
    pub fn error(&self, code: ErrorCode, message: &str) -> ParseError {
        ParseError::new(code, message, self.current_span())
    }

    #[inline]
    fn token_at(&self, index: usize) -> Token {
        match self.tokens.get(index) {
            Some(token) => *token,
            None => Token::new(TokenKind::Eof, Span::point(self.end_offset())),
        }
    }

    fn end_offset(&self) -> u32 {
        u32::try_from(self.source.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests;
