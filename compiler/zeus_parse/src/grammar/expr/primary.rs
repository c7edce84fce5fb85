//! Operands: literals, `(`-groups, calls and place chains.

use crate::{ParseError, Parser};
use zeus_diagnostic::ErrorCode;
use zeus_ir::{Expr, ExprId, ExprKind, Name, Span, TokenKind};
use zeus_lexer::literal;

impl Parser<'_> {
    pub(super) fn parse_operand(&mut self) -> Result<ExprId, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::LParen => self.parse_group(),
            TokenKind::Ident if self.cursor.peek_kind_at(1) == TokenKind::LParen => {
                self.parse_call()
            }
            TokenKind::Ident => self.parse_place(),
            TokenKind::Int
            | TokenKind::Decimal
            | TokenKind::Char
            | TokenKind::Str
            | TokenKind::True
            | TokenKind::False => self.parse_literal(),
            _ => Err(self.cursor.error(ErrorCode::E2002, "Invalid operand")),
        }
    }

    fn parse_literal(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.advance();
        let text = self.cursor.text(token);
        let kind = match token.kind {
            TokenKind::Int => ExprKind::Int(literal::parse_int(text).ok_or_else(|| {
                ParseError::new(ErrorCode::E2002, "Invalid integer literal", token.span)
            })?),
            TokenKind::Decimal => {
                ExprKind::Decimal(literal::parse_decimal(text).ok_or_else(|| {
                    ParseError::new(ErrorCode::E2002, "Invalid decimal literal", token.span)
                })?)
            }
            TokenKind::Char => {
                let body = literal::quoted_body(text);
                ExprKind::Char(literal::decode_char(body).ok_or_else(|| {
                    ParseError::new(ErrorCode::E2002, "Invalid character literal", token.span)
                })?)
            }
            TokenKind::Str => {
                ExprKind::Str(self.cursor.interner().intern(literal::quoted_body(text)))
            }
            TokenKind::True => ExprKind::Bool(true),
            _ => ExprKind::Bool(false),
        };
        Ok(self.arena.alloc_expr(Expr::new(kind, token.span)))
    }

    /// `name(args, ...)`
    fn parse_call(&mut self) -> Result<ExprId, ParseError> {
        let (name, start) = self.cursor.expect_ident("Expected a procedure name")?;
        self.cursor.advance();
        let mut args = Vec::new();
        if !self.cursor.eat(TokenKind::RParen) {
            loop {
                args.push(self.parse_nested_expr()?);
                if self.cursor.eat(TokenKind::Comma) {
                    continue;
                }
                if self.cursor.eat(TokenKind::RParen) {
                    break;
                }
                return Err(self.cursor.error(ErrorCode::E2001, "Expected ')' or ','"));
            }
        }
        let args = self.arena.alloc_expr_list(args);
        let span = self.span_from(start);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Call { name, args }, span)))
    }

    /// `ident^*(.ident^*)*[index]`
    ///
    /// Field links become `Modifier` nodes threaded through `child`; the
    /// last link is a `Var`, wrapped in `Index` when `[` follows.
    pub(crate) fn parse_place(&mut self) -> Result<ExprId, ParseError> {
        let mut links: Vec<(Name, u8, Span)> = Vec::new();
        loop {
            let (name, start) = self.cursor.expect_ident("Identifier required")?;
            let deref = self.parse_carets()?;
            let span = self.span_from(start);
            if self.cursor.eat(TokenKind::Dot) {
                links.push((name, deref, span));
                continue;
            }

            let mut leaf = self
                .arena
                .alloc_expr(Expr::new(ExprKind::Var { name, deref }, span));
            if self.cursor.eat(TokenKind::LBracket) {
                let index = self.parse_nested_expr()?;
                self.cursor.expect(TokenKind::RBracket, "Expected ']'")?;
                let span = self.span_from(start);
                leaf = self
                    .arena
                    .alloc_expr(Expr::new(ExprKind::Index { base: leaf, index }, span));
            }

            let end = self.cursor.previous_span();
            let mut child = leaf;
            for (name, deref, span) in links.into_iter().rev() {
                child = self.arena.alloc_expr(Expr::new(
                    ExprKind::Modifier { name, deref, child },
                    span.merge(end),
                ));
            }
            return Ok(child);
        }
    }
}
