//! Statement Parsing
//!
//! Dispatch is on the first token. Statements starting with an identifier
//! are the ambiguous case: `name ::` starts an item, a target list followed
//! by `:` or `=` is a declaration or assignment, and anything else is an
//! expression statement.

use crate::{ParseError, Parser};
use zeus_diagnostic::ErrorCode;
use zeus_ir::{
    ExprId, ExprKind, ExprRange, ForKind, RangeLoop, Span, Stmt, StmtId, StmtKind, StmtRange,
    TokenKind,
};
use zeus_stack::ensure_sufficient_stack;

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<StmtId, ParseError> {
        ensure_sufficient_stack(|| match self.cursor.current_kind() {
            TokenKind::For => self.parse_for(),
            TokenKind::If => self.parse_if(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Else => Err(self
                .cursor
                .error(ErrorCode::E2007, "Expected 'if' before 'else'")),
            TokenKind::PoundImport | TokenKind::PoundStackSize => Err(self.misplaced_directive()),
            TokenKind::Ident
                if self.cursor.peek_kind_at(1) == TokenKind::Colon
                    && self.cursor.peek_kind_at(2) == TokenKind::Colon =>
            {
                self.parse_item()
            }
            TokenKind::Ident => self.parse_ident_statement(),
            _ => self.parse_expr_statement(),
        })
    }

    fn parse_expr_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.current_span();
        let expr = self.parse_expr()?;
        Ok(self.alloc_stmt(StmtKind::Expr(expr), start))
    }

    /// Declaration, assignment, or expression.
    fn parse_ident_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.current_span();
        let snapshot = self.snapshot();
        let targets = match self.parse_targets() {
            Ok(targets)
                if self.cursor.check(TokenKind::Colon) || self.cursor.check(TokenKind::Eq) =>
            {
                targets
            }
            _ => {
                self.restore(snapshot);
                return self.parse_expr_statement();
            }
        };

        if self.cursor.eat(TokenKind::Eq) {
            let value = self.parse_expr()?;
            return Ok(self.alloc_stmt(StmtKind::Assign { targets, value }, start));
        }
        self.cursor.advance();
        self.parse_decl_tail(targets, start)
    }

    /// `place {, place}`
    fn parse_targets(&mut self) -> Result<ExprRange, ParseError> {
        let mut targets = vec![self.parse_place()?];
        while self.cursor.eat(TokenKind::Comma) {
            targets.push(self.parse_place()?);
        }
        Ok(self.arena.alloc_expr_list(targets))
    }

    /// What follows the `:` of a declaration: `type`, `type = e` or `= e`.
    pub(crate) fn parse_decl_tail(
        &mut self,
        targets: ExprRange,
        start: Span,
    ) -> Result<StmtId, ParseError> {
        for &target in self.arena.expr_list(targets) {
            let expr = self.arena.expr(target);
            if !matches!(expr.kind, ExprKind::Var { deref: 0, .. }) {
                return Err(ParseError::new(
                    ErrorCode::E2004,
                    "Only plain identifiers can be declared",
                    expr.span,
                ));
            }
        }

        let ty = if self.cursor.check(TokenKind::Eq) {
            None
        } else {
            Some(self.parse_type()?)
        };
        let init = if self.cursor.eat(TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(self.alloc_stmt(StmtKind::Decl { targets, ty, init }, start))
    }

    /// `if cond body [else body | else if ...]`
    fn parse_if(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let cond = self.parse_expr()?;
        self.cursor.skip_newlines();
        let then_body = self.parse_body()?;

        let else_body = if self.at_else() {
            self.cursor.skip_newlines();
            self.cursor.advance();
            if self.cursor.check(TokenKind::If) {
                let nested = self.parse_if()?;
                self.arena.alloc_stmt_list([nested])
            } else {
                self.parse_body()?
            }
        } else {
            StmtRange::EMPTY
        };

        Ok(self.alloc_stmt(
            StmtKind::If {
                cond,
                then_body,
                else_body,
            },
            start,
        ))
    }

    /// `else` at the cursor, possibly after newlines.
    fn at_else(&self) -> bool {
        let mut n = 0;
        while self.cursor.peek_kind_at(n) == TokenKind::Newline {
            n += 1;
        }
        self.cursor.peek_kind_at(n) == TokenKind::Else
    }

    /// ```text
    /// for body
    /// for iter : [type] = start ... end [.. step] body
    /// for cond body
    /// ```
    fn parse_for(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let kind = match self.cursor.current_kind() {
            TokenKind::LBrace | TokenKind::Colon => ForKind::Forever,
            TokenKind::Ident if self.cursor.peek_kind_at(1) == TokenKind::Colon => {
                ForKind::Range(self.parse_range_header()?)
            }
            _ => ForKind::While {
                cond: self.parse_expr()?,
            },
        };
        let body = self.parse_body()?;
        Ok(self.alloc_stmt(StmtKind::For { kind, body }, start))
    }

    fn parse_range_header(&mut self) -> Result<RangeLoop, ParseError> {
        let (iter, iter_span) = self.cursor.expect_ident("Expected the iterator name")?;
        self.cursor.advance();
        let ty = if self.cursor.check(TokenKind::Eq) {
            None
        } else {
            Some(self.parse_type()?)
        };
        self.cursor.expect(TokenKind::Eq, "Expected '='")?;
        let start = self.parse_expr()?;
        self.cursor.expect(TokenKind::DotDotDot, "Expected '...'")?;
        let end = self.parse_expr()?;
        let step = if self.cursor.eat(TokenKind::DotDot) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(RangeLoop {
            iter,
            iter_span,
            ty,
            start,
            end,
            step,
        })
    }

    /// `return [e {, e}]`
    fn parse_return(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let mut values: Vec<ExprId> = Vec::new();
        if !matches!(
            self.cursor.current_kind(),
            TokenKind::Newline | TokenKind::Eof | TokenKind::RBrace
        ) {
            values.push(self.parse_expr()?);
            while self.cursor.eat(TokenKind::Comma) {
                values.push(self.parse_expr()?);
            }
        }
        let values = self.arena.alloc_expr_list(values);
        Ok(self.alloc_stmt(StmtKind::Return(values), start))
    }

    pub(crate) fn alloc_stmt(&mut self, kind: StmtKind, start: Span) -> StmtId {
        let span = self.span_from(start);
        self.arena.alloc_stmt(Stmt::new(kind, span))
    }
}
