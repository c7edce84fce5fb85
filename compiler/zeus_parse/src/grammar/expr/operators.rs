//! Binary operators and precedence repair.

use crate::{ParseError, Parser};
use zeus_diagnostic::ErrorCode;
use zeus_ir::{BinaryOp, Expr, ExprId, ExprKind, TokenKind};

impl Parser<'_> {
    /// Operator at the cursor, `None` at a token that ends an expression.
    pub(super) fn binary_op(&self) -> Result<Option<BinaryOp>, ParseError> {
        Ok(Some(match self.cursor.current_kind() {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            TokenKind::Eof
            | TokenKind::Newline
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::DotDot
            | TokenKind::DotDotDot
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::LBrace
            | TokenKind::RBrace => return Ok(None),
            _ => return Err(self.cursor.error(ErrorCode::E2001, "Invalid operator")),
        }))
    }

    /// Build `lhs op rhs` where `rhs` was parsed from the rest of the
    /// expression.
    ///
    /// `rhs` is already correct for its own tokens. If its root binds no
    /// tighter than `op`, `lhs op` belongs below it: walk down the left
    /// spine while nodes bind no tighter than `op`, and replace the left
    /// operand `x` of the deepest such node with `lhs op x`. Parenthesized
    /// nodes stop the walk.
    pub(super) fn attach_binary(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        let precedence = op.precedence();
        let lhs_span = self.arena.expr(lhs).span;

        if !self.rotates_under(rhs, precedence) {
            let span = lhs_span.merge(self.arena.expr(rhs).span);
            return self.arena.alloc_expr(Expr::new(
                ExprKind::Binary {
                    op,
                    lhs,
                    rhs,
                    parenthesized: false,
                },
                span,
            ));
        }

        let mut spine = vec![rhs];
        let mut pivot = rhs;
        while let ExprKind::Binary { lhs: inner, .. } = self.arena.expr(pivot).kind {
            if !self.rotates_under(inner, precedence) {
                break;
            }
            pivot = inner;
            spine.push(pivot);
        }

        let ExprKind::Binary { lhs: captured, .. } = self.arena.expr(pivot).kind else {
            return rhs;
        };
        let span = lhs_span.merge(self.arena.expr(captured).span);
        let node = self.arena.alloc_expr(Expr::new(
            ExprKind::Binary {
                op,
                lhs,
                rhs: captured,
                parenthesized: false,
            },
            span,
        ));
        if let ExprKind::Binary { lhs: slot, .. } = &mut self.arena.expr_mut(pivot).kind {
            *slot = node;
        }
        for id in spine {
            let expr = self.arena.expr_mut(id);
            expr.span = lhs_span.merge(expr.span);
        }
        rhs
    }

    /// Unparenthesized binary node binding no tighter than `precedence`.
    fn rotates_under(&self, id: ExprId, precedence: u8) -> bool {
        matches!(
            self.arena.expr(id).kind,
            ExprKind::Binary { op, parenthesized: false, .. } if op.precedence() <= precedence
        )
    }
}
