//! Item Parsing
//!
//! `name :: struct body` and `name :: proc(inputs) [-> outputs] [body]`.
//! A procedure without a body is a declaration whose label comes from
//! elsewhere.

use crate::{ParseError, Parser};
use zeus_diagnostic::ErrorCode;
use zeus_ir::{Expr, ExprKind, ProcSignature, StmtId, StmtKind, StmtRange, TokenKind, TypeRange};

impl Parser<'_> {
    pub(crate) fn parse_item(&mut self) -> Result<StmtId, ParseError> {
        let (name, name_span) = self.cursor.expect_ident("Expected a name")?;
        self.cursor.advance();
        self.cursor.advance();
        match self.cursor.current_kind() {
            TokenKind::Struct => {
                self.cursor.advance();
                let body = self.parse_body()?;
                Ok(self.alloc_stmt(
                    StmtKind::Struct {
                        name,
                        name_span,
                        body,
                    },
                    name_span,
                ))
            }
            TokenKind::Proc => {
                self.cursor.advance();
                let inputs = self.parse_inputs()?;
                let outputs = self.parse_outputs()?;
                let sig = ProcSignature {
                    name,
                    name_span,
                    inputs,
                    outputs,
                };
                match self.cursor.current_kind() {
                    TokenKind::LBrace | TokenKind::Colon => {
                        let body = self.parse_body()?;
                        Ok(self.alloc_stmt(StmtKind::ProcDef { sig, body }, name_span))
                    }
                    TokenKind::Newline | TokenKind::Eof => {
                        Ok(self.alloc_stmt(StmtKind::ProcDecl(sig), name_span))
                    }
                    _ => Err(self
                        .cursor
                        .error(ErrorCode::E2006, "Expected '{' or ':'")),
                }
            }
            _ => Err(self
                .cursor
                .error(ErrorCode::E2001, "Expected 'struct' or 'proc' after '::'")),
        }
    }

    /// `( [decl {, decl}] )`, each input a declaration statement.
    fn parse_inputs(&mut self) -> Result<StmtRange, ParseError> {
        self.cursor.expect(TokenKind::LParen, "Expected '('")?;
        let mut inputs = Vec::new();
        if !self.cursor.eat(TokenKind::RParen) {
            loop {
                let start = self.cursor.current_span();
                let (name, span) = self.cursor.expect_ident("Expected an input name")?;
                let deref = self.parse_carets()?;
                let target = self.arena.alloc_expr(Expr::new(
                    ExprKind::Var { name, deref },
                    self.span_from(span),
                ));
                let targets = self.arena.alloc_expr_list([target]);
                self.cursor.expect(TokenKind::Colon, "Expected ':'")?;
                inputs.push(self.parse_decl_tail(targets, start)?);
                if self.cursor.eat(TokenKind::Comma) {
                    continue;
                }
                if self.cursor.eat(TokenKind::RParen) {
                    break;
                }
                return Err(self.cursor.error(ErrorCode::E2001, "Expected ')' or ','"));
            }
        }
        Ok(self.arena.alloc_stmt_list(inputs))
    }

    /// `-> type` or `-> (type {, type})`; empty without `->`.
    fn parse_outputs(&mut self) -> Result<TypeRange, ParseError> {
        if !(self.cursor.check(TokenKind::Minus) && self.cursor.peek_kind_at(1) == TokenKind::Gt)
        {
            return Ok(TypeRange::EMPTY);
        }
        self.cursor.advance();
        self.cursor.advance();

        let mut outputs = Vec::new();
        if self.cursor.eat(TokenKind::LParen) {
            loop {
                outputs.push(self.parse_type()?);
                if self.cursor.eat(TokenKind::Comma) {
                    continue;
                }
                if self.cursor.eat(TokenKind::RParen) {
                    break;
                }
                return Err(self.cursor.error(ErrorCode::E2001, "Expected ')' or ','"));
            }
        } else {
            outputs.push(self.parse_type()?);
            if self.cursor.check(TokenKind::RParen) {
                return Err(ParseError::stray_close_paren(self.cursor.current_span()));
            }
        }
        Ok(self.arena.alloc_type_list(outputs))
    }
}
