//! Expression nodes.

use super::{BinaryOp, ExprId, ExprRange};
use crate::{Name, Span};

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Integer literal, `_` separators removed.
    Int(u64),
    /// Decimal literal.
    Decimal(f64),
    /// Character literal, escapes decoded.
    Char(u8),
    /// String literal. The name holds the raw body between the quotes,
    /// escapes left as written so they can be emitted verbatim.
    Str(Name),
    Bool(bool),

    /// Variable reference. `deref` counts the trailing `^` accesses.
    Var { name: Name, deref: u8 },

    /// One link of a field-access chain `name.child`.
    ///
    /// The chain is right-threaded: `a.b.c` is
    /// `Modifier(a) -> Modifier(b) -> Var(c)`.
    Modifier { name: Name, deref: u8, child: ExprId },

    /// `base[index]`.
    Index { base: ExprId, index: ExprId },

    /// `name(args...)`.
    Call { name: Name, args: ExprRange },

    /// `{e1, e2, ...}`.
    InitList(ExprRange),

    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
        /// Written inside explicit parentheses. Rebalancing never rotates
        /// across a parenthesized node.
        parenthesized: bool,
    },
}

impl ExprKind {
    /// Whether this expression can appear on the left of `=`.
    pub fn is_place(&self) -> bool {
        matches!(
            self,
            ExprKind::Var { .. } | ExprKind::Modifier { .. } | ExprKind::Index { .. }
        )
    }

    /// Literal accepted as a global initializer.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            ExprKind::Int(_) | ExprKind::Decimal(_) | ExprKind::Char(_) | ExprKind::Str(_)
        )
    }
}
