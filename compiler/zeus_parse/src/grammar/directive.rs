//! File-scope pound directives.

use crate::{ParseError, Parser};
use zeus_diagnostic::ErrorCode;
use zeus_ir::{Import, Span, TokenKind};
use zeus_lexer::literal;

impl Parser<'_> {
    /// `#import "path"`
    pub(crate) fn parse_import(&mut self) -> Result<Import, ParseError> {
        let start = self.cursor.advance().span;
        if !self.cursor.check(TokenKind::Str) {
            return Err(self
                .cursor
                .error(ErrorCode::E2008, "Expected a file path string after #import"));
        }
        let token = self.cursor.advance();
        let body = literal::quoted_body(self.cursor.text(token));
        if body.is_empty() {
            return Err(ParseError::new(
                ErrorCode::E2008,
                "Import path cannot be empty",
                token.span,
            ));
        }
        let path = self.cursor.interner().intern(body);
        Ok(Import {
            path,
            span: self.span_from(start),
        })
    }

    /// `#stack_size N`, in kilobytes.
    pub(crate) fn parse_stack_size(&mut self) -> Result<(u64, Span), ParseError> {
        let start = self.cursor.advance().span;
        if !self.cursor.check(TokenKind::Int) {
            return Err(self
                .cursor
                .error(ErrorCode::E2008, "Expected an integer after #stack_size"));
        }
        let token = self.cursor.advance();
        match literal::parse_int(self.cursor.text(token)) {
            Some(kb) if kb > 0 => Ok((kb, self.span_from(start))),
            _ => Err(ParseError::new(
                ErrorCode::E2008,
                "Stack size must be a positive number of kilobytes",
                token.span,
            )),
        }
    }

    /// Directives are only legal at file scope.
    #[cold]
    pub(crate) fn misplaced_directive(&self) -> ParseError {
        self.cursor.error(
            ErrorCode::E2008,
            "Pound directives are only allowed at file scope",
        )
    }
}
