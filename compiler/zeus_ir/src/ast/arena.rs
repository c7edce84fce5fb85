//! Per-file AST storage.
//!
//! # Index Spaces
//!
//! - `exprs`: indexed by [`ExprId`]
//! - `stmts`: indexed by [`StmtId`]
//! - `expr_lists`: flat `Vec<ExprId>` indexed by [`ExprRange`]
//! - `stmt_lists`: flat `Vec<StmtId>` indexed by [`StmtRange`]
//! - `type_lists`: flat `Vec<TypeRef>` indexed by [`TypeRange`]

use super::{Expr, ExprId, ExprRange, Stmt, StmtId, StmtRange, TypeRange, TypeRef};

/// Convert a length to `u32`, panicking with the collection name on overflow.
#[inline]
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("too many {what} in one file"))
}

/// Arena position captured before speculative parsing.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ArenaCheckpoint {
    exprs: usize,
    stmts: usize,
    expr_lists: usize,
    stmt_lists: usize,
    type_lists: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AstArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
    type_lists: Vec<TypeRef>,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate based on source length, roughly one expression per
    /// eight bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 8;
        AstArena {
            exprs: Vec::with_capacity(estimated),
            stmts: Vec::with_capacity(estimated / 2),
            expr_lists: Vec::with_capacity(estimated / 4),
            stmt_lists: Vec::with_capacity(estimated / 2),
            type_lists: Vec::new(),
        }
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(expr);
        id
    }

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        self.stmts.push(stmt);
        id
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len(), "expression lists");
        self.expr_lists.extend(ids);
        let len = to_u32(self.expr_lists.len(), "expression lists") - start;
        ExprRange::new(start, len)
    }

    pub fn alloc_stmt_list(&mut self, ids: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = to_u32(self.stmt_lists.len(), "statement lists");
        self.stmt_lists.extend(ids);
        let len = to_u32(self.stmt_lists.len(), "statement lists") - start;
        StmtRange::new(start, len)
    }

    pub fn alloc_type_list(&mut self, types: impl IntoIterator<Item = TypeRef>) -> TypeRange {
        let start = to_u32(self.type_lists.len(), "type lists");
        self.type_lists.extend(types);
        let len = to_u32(self.type_lists.len(), "type lists") - start;
        TypeRange::new(start, len)
    }

    #[inline]
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.to_range()]
    }

    #[inline]
    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.to_range()]
    }

    #[inline]
    pub fn type_list(&self, range: TypeRange) -> &[TypeRef] {
        &self.type_lists[range.to_range()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn checkpoint(&self) -> ArenaCheckpoint {
        ArenaCheckpoint {
            exprs: self.exprs.len(),
            stmts: self.stmts.len(),
            expr_lists: self.expr_lists.len(),
            stmt_lists: self.stmt_lists.len(),
            type_lists: self.type_lists.len(),
        }
    }

    /// Discard everything allocated since `checkpoint`.
    pub fn rollback(&mut self, checkpoint: ArenaCheckpoint) {
        self.exprs.truncate(checkpoint.exprs);
        self.stmts.truncate(checkpoint.stmts);
        self.expr_lists.truncate(checkpoint.expr_lists);
        self.stmt_lists.truncate(checkpoint.stmt_lists);
        self.type_lists.truncate(checkpoint.type_lists);
    }
}
