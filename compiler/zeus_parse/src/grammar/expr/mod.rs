//! Expression Parsing
//!
//! Expressions are read left to right as `operand (op operand)*`. Each
//! `lhs op rest` step parses `rest` first, which yields a right-leaning
//! tree, and then rotates `lhs op` down into it until precedence and left
//! associativity hold (see [`operators`]).
//!
//! A `(`-group is an operand whose node is flagged as parenthesized, so no
//! later rotation reaches into it. The parser counts open groups per
//! expression to report missing closing brackets.

mod operators;
mod primary;

use crate::{ParseError, Parser};
use zeus_diagnostic::ErrorCode;
use zeus_ir::{Expr, ExprId, ExprKind, TokenKind};
use zeus_stack::ensure_sufficient_stack;

impl Parser<'_> {
    /// Expression in statement position. A `)` left over here has no
    /// matching `(`.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        let expr = self.parse_nested_expr()?;
        if self.cursor.check(TokenKind::RParen) {
            return Err(ParseError::stray_close_paren(self.cursor.current_span()));
        }
        Ok(expr)
    }

    /// Expression inside call arguments, brackets or initializer lists,
    /// where the closing token belongs to the caller.
    pub(crate) fn parse_nested_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| {
            let saved = (self.paren_base, self.expr_start);
            self.paren_base = self.parens;
            self.expr_start = self.cursor.current_span();
            let result = if self.cursor.check(TokenKind::LBrace) {
                self.parse_init_list()
            } else {
                self.parse_chain()
            };
            (self.paren_base, self.expr_start) = saved;
            result
        })
    }

    /// `operand [op chain]`
    fn parse_chain(&mut self) -> Result<ExprId, ParseError> {
        let lhs = self.parse_operand()?;
        let Some(op) = self.binary_op()? else {
            return Ok(lhs);
        };
        self.cursor.advance();
        let rhs = ensure_sufficient_stack(|| self.parse_chain())?;
        Ok(self.attach_binary(op, lhs, rhs))
    }

    /// `( chain )`
    fn parse_group(&mut self) -> Result<ExprId, ParseError> {
        let open = self.cursor.advance().span;
        self.parens += 1;
        let inner = ensure_sufficient_stack(|| self.parse_chain())?;
        if !self.cursor.check(TokenKind::RParen) {
            return Err(ParseError::missing_close_parens(
                self.parens - self.paren_base,
                self.expr_start,
            ));
        }
        self.cursor.advance();
        self.parens -= 1;

        let span = self.span_from(open);
        let expr = self.arena.expr_mut(inner);
        expr.span = span;
        if let ExprKind::Binary { parenthesized, .. } = &mut expr.kind {
            *parenthesized = true;
        }
        Ok(inner)
    }

    /// `{ e, ... }`, only at the start of an expression.
    fn parse_init_list(&mut self) -> Result<ExprId, ParseError> {
        let open = self.cursor.advance().span;
        let mut elements = Vec::new();
        if !self.cursor.check(TokenKind::RBrace) {
            loop {
                elements.push(self.parse_nested_expr()?);
                if self.cursor.eat(TokenKind::Comma) {
                    continue;
                }
                if self.cursor.check(TokenKind::RBrace) {
                    break;
                }
                return Err(self.cursor.error(ErrorCode::E2001, "Expected ',' or '}'"));
            }
        }
        self.cursor.advance();
        let list = self.arena.alloc_expr_list(elements);
        let span = self.span_from(open);
        Ok(self.arena.alloc_expr(Expr::new(ExprKind::InitList(list), span)))
    }
}
