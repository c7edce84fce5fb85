//! Statement nodes and type references.

use super::{ExprId, ExprRange, StmtRange, TypeRange};
use crate::{Name, Span, Type};

/// Written type: `^^s32`, `Point`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeRef {
    pub kind: TypeRefKind,
    pub pointer_depth: u8,
    pub span: Span,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeRefKind {
    /// A type keyword.
    Builtin(Type),
    /// A structure name, resolved by the checker.
    Named(Name),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    #[inline]
    pub const fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// Procedure signature shared by definitions and bodiless declarations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProcSignature {
    pub name: Name,
    pub name_span: Span,
    /// Input declarations (`Decl` statements).
    pub inputs: StmtRange,
    pub outputs: TypeRange,
}

/// The three loop shapes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ForKind {
    /// `for { ... }`
    Forever,
    /// `for cond { ... }`
    While { cond: ExprId },
    /// `for i : [type] = start ... end [.. step] { ... }`
    Range(RangeLoop),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RangeLoop {
    pub iter: Name,
    pub iter_span: Span,
    pub ty: Option<TypeRef>,
    pub start: ExprId,
    pub end: ExprId,
    pub step: Option<ExprId>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `a : type`, `a : type = e`, `a := e`, `a, b : type`.
    Decl {
        targets: ExprRange,
        ty: Option<TypeRef>,
        init: Option<ExprId>,
    },
    /// `a = e`, `a, b = f()`.
    Assign { targets: ExprRange, value: ExprId },
    If {
        cond: ExprId,
        then_body: StmtRange,
        else_body: StmtRange,
    },
    For { kind: ForKind, body: StmtRange },
    Return(ExprRange),
    ProcDef {
        sig: ProcSignature,
        body: StmtRange,
    },
    /// Signature without a body. The label is expected from elsewhere.
    ProcDecl(ProcSignature),
    Struct {
        name: Name,
        name_span: Span,
        body: StmtRange,
    },
    Expr(ExprId),
}

impl StmtKind {
    pub const fn name(&self) -> &'static str {
        match self {
            StmtKind::Decl { .. } => "declaration",
            StmtKind::Assign { .. } => "assignment",
            StmtKind::If { .. } => "if",
            StmtKind::For { .. } => "for",
            StmtKind::Return(_) => "return",
            StmtKind::ProcDef { .. } => "procedure definition",
            StmtKind::ProcDecl(_) => "procedure declaration",
            StmtKind::Struct { .. } => "structure",
            StmtKind::Expr(_) => "expression",
        }
    }
}
